//! Guild and guild settings domain models.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// A Discord guild the bot has stored data for.
#[derive(Debug, Clone, PartialEq)]
pub struct Guild {
    /// Discord ID of the guild.
    pub guild_id: u64,
    /// When the guild was first seen by the bot.
    pub created_at: DateTime<Utc>,
}

impl Guild {
    /// Converts an entity model to a guild domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Guild)` - The converted guild
    /// - `Err(AppError::InternalErr(ParseStringId))` - Stored guild ID is not a valid u64
    pub fn from_entity(entity: entity::guild::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            created_at: entity.created_at,
        })
    }
}

/// Per-guild configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSettings {
    /// Discord ID of the guild the settings belong to.
    pub guild_id: u64,
    /// Channel that receives submitted applications, if configured.
    pub application_channel_id: Option<u64>,
    /// Last time the settings were changed.
    pub updated_at: DateTime<Utc>,
}

impl GuildSettings {
    /// Converts an entity model to a settings domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - The converted settings
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored ID is not a valid u64
    pub fn from_entity(entity: entity::guild_settings::Model) -> Result<Self, AppError> {
        let application_channel_id = entity
            .application_channel_id
            .map(parse_u64_from_string)
            .transpose()?;

        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            application_channel_id,
            updated_at: entity.updated_at,
        })
    }
}
