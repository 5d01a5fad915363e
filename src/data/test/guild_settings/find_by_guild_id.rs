use super::*;

/// Tests reading configured settings.
///
/// Expected: Ok(Some) with the application channel parsed
#[tokio::test]
async fn finds_configured_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    factory::create_guild_settings(db, &guild.guild_id, "777").await?;

    let guild_id = guild.guild_id.parse::<u64>().unwrap();
    let settings = GuildSettingsRepository::new(db)
        .find_by_guild_id(guild_id)
        .await?
        .unwrap();

    assert_eq!(settings.guild_id, guild_id);
    assert_eq!(settings.application_channel_id, Some(777));

    Ok(())
}

/// Tests reading settings for an unconfigured guild.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_unconfigured() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = GuildSettingsRepository::new(db).find_by_guild_id(1).await?;

    assert!(settings.is_none());

    Ok(())
}

/// Tests a settings row without a channel.
///
/// Expected: Ok(Some) with no application channel
#[tokio::test]
async fn handles_missing_application_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::create_guild(db).await?;
    factory::guild_settings::GuildSettingsFactory::new(db, &guild.guild_id)
        .build()
        .await?;

    let settings = GuildSettingsRepository::new(db)
        .find_by_guild_id(guild.guild_id.parse().unwrap())
        .await?
        .unwrap();

    assert!(settings.application_channel_id.is_none());

    Ok(())
}
