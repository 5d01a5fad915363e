use serenity::all::Permissions;
use thiserror::Error;

use crate::model::auth::ManagerTier;

/// Reasons a privileged command was refused by the authorization gate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The actor's computed Discord permissions lack the bits the command needs.
    #[error("Missing native permissions: {0:?}")]
    InsufficientNativePermission(Permissions),

    /// The actor holds only the limited manager tier but the command needs the full tier.
    #[error("Command requires the full manager tier")]
    RequiresFullManagerTier,

    /// The actor holds neither manager tier.
    #[error("Actor holds no manager tier")]
    NotAManager,

    /// The target role sits at or above the bot's highest role.
    #[error("Role at position {target} is not below the bot's top role at position {bot_top}")]
    RoleHierarchyViolation { target: u16, bot_top: u16 },

    /// Privileged commands only make sense inside a guild.
    #[error("Command used outside of a guild")]
    GuildOnly,
}

impl AuthError {
    /// Message shown to the actor when the gate denies a command.
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientNativePermission(_) => {
                "You don't have permission to use this command!".to_string()
            }
            Self::RequiresFullManagerTier => format!(
                "This command requires the {} role.",
                ManagerTier::Full.role_name()
            ),
            Self::NotAManager => format!(
                "You need the {} or {} role to use this command.",
                ManagerTier::Full.role_name(),
                ManagerTier::Limited.role_name()
            ),
            Self::RoleHierarchyViolation { .. } => {
                "I cannot manage roles higher than or equal to my highest role!".to_string()
            }
            Self::GuildOnly => "This command can only be used in a server.".to_string(),
        }
    }
}
