//! Moderation warning domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// A warning issued to a guild member by a moderator.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub id: i32,
    /// Discord ID of the guild the warning was issued in.
    pub guild_id: u64,
    /// Discord ID of the warned user.
    pub user_id: u64,
    /// Discord ID of the moderator who issued the warning.
    pub moderator_id: u64,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Warning {
    /// Converts an entity model to a warning domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Warning)` - The converted warning
    /// - `Err(AppError::InternalErr(ParseStringId))` - A stored ID is not a valid u64
    pub fn from_entity(entity: entity::warning::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            moderator_id: parse_u64_from_string(entity.moderator_id)?,
            reason: entity.reason,
            created_at: entity.created_at,
        })
    }

    /// Reason text for display, with a placeholder when none was given.
    pub fn reason_or_default(&self) -> &str {
        self.reason.as_deref().unwrap_or(NO_REASON)
    }
}

/// Placeholder shown when a moderator gives no reason.
pub const NO_REASON: &str = "No reason provided";

/// Longest free-text reason accepted by commands, matching Discord's audit log limit.
pub const MAX_REASON_LENGTH: u16 = 512;

/// Parameters for recording a new warning.
#[derive(Debug, Clone)]
pub struct CreateWarningParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: Option<String>,
}

/// A freshly recorded warning along with the target's running total in the guild.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedWarning {
    pub warning: Warning,
    pub total: u64,
}
