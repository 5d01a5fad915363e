use sea_orm::DatabaseConnection;

use crate::{
    data::{guild::GuildRepository, guild_settings::GuildSettingsRepository},
    error::AppError,
    model::guild::GuildSettings,
};

pub struct GuildSettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the channel that receives applications, creating the guild row if needed.
    pub async fn set_application_channel(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<GuildSettings, AppError> {
        GuildRepository::new(self.db).get_or_create(guild_id).await?;

        GuildSettingsRepository::new(self.db)
            .set_application_channel(guild_id, channel_id)
            .await
    }

    /// Gets the configured application channel, if any.
    pub async fn application_channel(&self, guild_id: u64) -> Result<Option<u64>, AppError> {
        let settings = GuildSettingsRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?;

        Ok(settings.and_then(|s| s.application_channel_id))
    }
}
