use super::*;

/// Tests counting only the target user's warnings in the target guild.
///
/// Expected: Ok(3) despite warnings for other users and guilds
#[tokio::test]
async fn counts_warnings_per_user_and_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (guild, _) = factory::helpers::create_guild_with_warnings(db, "42", 3).await?;
    factory::warning::WarningFactory::new(db, &guild.guild_id)
        .user_id("43")
        .build()
        .await?;
    let (_, _) = factory::helpers::create_guild_with_warnings(db, "42", 2).await?;

    let count = WarningRepository::new(db)
        .count_by_user(guild.guild_id.parse().unwrap(), 42)
        .await?;

    assert_eq!(count, 3);

    Ok(())
}

/// Tests counting for a user with no warnings.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_without_warnings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let count = WarningRepository::new(db).count_by_user(1, 42).await?;

    assert_eq!(count, 0);

    Ok(())
}
