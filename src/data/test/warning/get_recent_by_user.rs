use super::*;

/// Tests warnings come back newest first and respect the limit.
///
/// Expected: Ok with the two most recent warnings
#[tokio::test]
async fn returns_newest_first_within_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    let now = Utc::now();

    for (days_ago, reason) in [(3, "oldest"), (1, "newest"), (2, "middle")] {
        factory::warning::WarningFactory::new(db, &guild.guild_id)
            .user_id("42")
            .reason(Some(reason.to_string()))
            .created_at(now - Duration::days(days_ago))
            .build()
            .await?;
    }

    let warnings = WarningRepository::new(db)
        .get_recent_by_user(guild.guild_id.parse().unwrap(), 42, 2)
        .await?;

    let reasons: Vec<_> = warnings.iter().map(|w| w.reason_or_default()).collect();
    assert_eq!(reasons, vec!["newest", "middle"]);

    Ok(())
}

/// Tests other users' warnings are excluded.
///
/// Expected: Ok with an empty list
#[tokio::test]
async fn excludes_other_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (guild, _) = factory::helpers::create_guild_with_warnings(db, "43", 2).await?;

    let warnings = WarningRepository::new(db)
        .get_recent_by_user(guild.guild_id.parse().unwrap(), 42, 10)
        .await?;

    assert!(warnings.is_empty());

    Ok(())
}
