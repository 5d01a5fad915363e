use super::*;

/// Tests creating a guild the first time it is seen.
///
/// Expected: Ok with one guild row stored
#[tokio::test]
async fn creates_missing_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = GuildRepository::new(db).get_or_create(123456789).await?;

    assert_eq!(guild.guild_id, 123456789);
    assert_eq!(entity::prelude::Guild::find().count(db).await?, 1);

    Ok(())
}

/// Tests an existing guild is returned unchanged.
///
/// Verifies no duplicate row is created and the original creation time is kept.
///
/// Expected: Ok with the original created_at
#[tokio::test]
async fn returns_existing_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::guild::GuildFactory::new(db)
        .guild_id("555")
        .build()
        .await?;

    let guild = GuildRepository::new(db).get_or_create(555).await?;

    assert_eq!(guild.created_at.timestamp(), existing.created_at.timestamp());
    assert_eq!(entity::prelude::Guild::find().count(db).await?, 1);

    Ok(())
}
