//! Guild data repository.
//!
//! Guild rows anchor every other guild-scoped record; they are created on demand the
//! first time a guild stores settings or warnings.

use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::guild::Guild};

pub struct GuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the stored guild, inserting it first if this is the first time it is seen.
    ///
    /// The original `created_at` is preserved when the guild already exists.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    ///
    /// # Returns
    /// - `Ok(Guild)` - The existing or newly created guild
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn get_or_create(&self, guild_id: u64) -> Result<Guild, AppError> {
        let entity = entity::prelude::Guild::insert(entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::guild::Column::GuildId)
                .update_column(entity::guild::Column::GuildId)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Guild::from_entity(entity)
    }

    /// Finds a guild by its Discord guild ID.
    ///
    /// # Returns
    /// - `Ok(Some(Guild))` - Guild found
    /// - `Ok(None)` - The bot has stored nothing for this guild
    /// - `Err(AppError)` - Database error or corrupted ID
    #[cfg(test)]
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<Guild>, AppError> {
        use sea_orm::{ColumnTrait, QueryFilter};

        entity::prelude::Guild::find()
            .filter(entity::guild::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(Guild::from_entity)
            .transpose()
    }
}
