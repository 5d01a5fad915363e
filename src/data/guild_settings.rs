//! Guild settings data repository.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{error::AppError, model::guild::GuildSettings};

pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the settings row for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))` - Settings exist for the guild
    /// - `Ok(None)` - The guild has never been configured
    /// - `Err(AppError)` - Database error or corrupted ID
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GuildSettings>, AppError> {
        entity::prelude::GuildSettings::find()
            .filter(entity::guild_settings::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(GuildSettings::from_entity)
            .transpose()
    }

    /// Sets the channel that receives submitted applications.
    ///
    /// Creates the settings row when missing, otherwise replaces the channel and bumps
    /// `updated_at`. The guild row must already exist.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `channel_id` - Discord channel ID
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - The stored settings
    /// - `Err(AppError::DbErr)` - Database error, including a missing guild row
    pub async fn set_application_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<GuildSettings, AppError> {
        let entity = entity::prelude::GuildSettings::insert(entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            application_channel_id: ActiveValue::Set(Some(channel_id.to_string())),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::guild_settings::Column::GuildId)
                .update_columns([
                    entity::guild_settings::Column::ApplicationChannelId,
                    entity::guild_settings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GuildSettings::from_entity(entity)
    }
}
