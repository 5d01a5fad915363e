use super::*;

/// Tests finding a stored guild.
///
/// Expected: Ok(Some)
#[tokio::test]
async fn finds_existing_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db)
        .guild_id("42")
        .build()
        .await?;

    let guild = GuildRepository::new(db).find_by_guild_id(42).await?;

    assert_eq!(guild.map(|g| g.guild_id), Some(42));

    Ok(())
}

/// Tests looking up a guild that was never stored.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Guild)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guild = GuildRepository::new(db).find_by_guild_id(42).await?;

    assert!(guild.is_none());

    Ok(())
}
