use super::*;

/// Tests recording a warning with a reason.
///
/// Expected: Ok with all fields stored
#[tokio::test]
async fn creates_warning_with_reason() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db).guild_id("1").build().await?;

    let warning = WarningRepository::new(db)
        .create(CreateWarningParam {
            guild_id: 1,
            user_id: 42,
            moderator_id: 7,
            reason: Some("spam".to_string()),
        })
        .await?;

    assert_eq!(warning.guild_id, 1);
    assert_eq!(warning.user_id, 42);
    assert_eq!(warning.moderator_id, 7);
    assert_eq!(warning.reason_or_default(), "spam");

    Ok(())
}

/// Tests recording a warning without a reason.
///
/// Expected: Ok with the placeholder reason shown
#[tokio::test]
async fn creates_warning_without_reason() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db).guild_id("1").build().await?;

    let warning = WarningRepository::new(db)
        .create(CreateWarningParam {
            guild_id: 1,
            user_id: 42,
            moderator_id: 7,
            reason: None,
        })
        .await?;

    assert!(warning.reason.is_none());
    assert_eq!(warning.reason_or_default(), "No reason provided");

    Ok(())
}
