use super::*;

/// Tests configuring a guild for the first time.
///
/// Expected: Ok with a new settings row
#[tokio::test]
async fn creates_settings_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = factory::guild::GuildFactory::new(db).guild_id("10").build().await?;

    let settings = GuildSettingsRepository::new(db)
        .set_application_channel(10, 2000)
        .await?;

    assert_eq!(settings.guild_id, 10);
    assert_eq!(settings.application_channel_id, Some(2000));
    assert_eq!(guild.guild_id, "10");

    Ok(())
}

/// Tests changing the configured channel.
///
/// Verifies the existing row is updated instead of a second row being inserted.
///
/// Expected: Ok with the new channel and one row
#[tokio::test]
async fn replaces_existing_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_moderation_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db).guild_id("10").build().await?;
    let repo = GuildSettingsRepository::new(db);

    let first = repo.set_application_channel(10, 2000).await?;
    let second = repo.set_application_channel(10, 3000).await?;

    assert_eq!(second.application_channel_id, Some(3000));
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(entity::prelude::GuildSettings::find().count(db).await?, 1);

    Ok(())
}
