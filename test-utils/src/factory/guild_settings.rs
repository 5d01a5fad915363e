//! Guild settings factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating guild settings rows.
///
/// The referenced guild must already exist.
pub struct GuildSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    application_channel_id: Option<String>,
}

impl<'a> GuildSettingsFactory<'a> {
    /// Creates a new factory for the given guild with no application channel.
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            application_channel_id: None,
        }
    }

    /// Sets the application channel ID.
    pub fn application_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.application_channel_id = channel_id;
        self
    }

    /// Builds and inserts the settings entity into the database.
    pub async fn build(self) -> Result<entity::guild_settings::Model, DbErr> {
        entity::guild_settings::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            application_channel_id: ActiveValue::Set(self.application_channel_id),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates settings for a guild pointing at `channel_id`.
pub async fn create_guild_settings(
    db: &DatabaseConnection,
    guild_id: &str,
    channel_id: &str,
) -> Result<entity::guild_settings::Model, DbErr> {
    GuildSettingsFactory::new(db, guild_id)
        .application_channel_id(Some(channel_id.to_string()))
        .build()
        .await
}
