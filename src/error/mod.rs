//! Error types and user-facing error reporting.
//!
//! This module provides the bot's error hierarchy. The `AppError` enum is the
//! top-level error type returned by command handlers, services and repositories. It
//! wraps the domain-specific errors (authorization, game rules, configuration) and
//! knows how to turn itself into the notice shown to the user who triggered it.

pub mod auth;
pub mod config;
pub mod game;
pub mod internal;

use serenity::http::HttpError;
use thiserror::Error;

use crate::error::{auth::AuthError, config::ConfigError, game::GameError, internal::InternalError};

/// Generic notice shown for failures the user cannot do anything about.
const GENERIC_FAILURE: &str = "An error occurred while executing the command.";

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur while handling an interaction.
/// Expected failures (authorization denials, game rule violations, bad input) are
/// reported to the user as-is; unexpected failures are logged and reported with a
/// generic notice.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// The authorization gate refused the command.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// The game engine rejected a move or a new game.
    #[error(transparent)]
    GameErr(#[from] GameError),

    /// Unexpected internal inconsistency.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found, shown to the user
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request, shown to the user
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Returns true when Discord refused the request because the bot lacks permissions.
    pub fn is_discord_forbidden(&self) -> bool {
        match self {
            Self::DiscordErr(err) => match err.as_ref() {
                serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                    response.status_code.as_u16() == 403
                }
                serenity::Error::Model(serenity::all::ModelError::InvalidPermissions {
                    ..
                }) => true,
                _ => false,
            },
            _ => false,
        }
    }

    /// Converts the error into the notice shown to the user.
    ///
    /// Expected failures map to their own messages. Database, Discord and internal
    /// errors are logged with full details while the user receives a generic notice.
    ///
    /// # Returns
    /// - `Some(String)` - Notice to send back to the user
    /// - `None` - The failure is acknowledged silently (occupied game cell)
    pub fn into_user_message(self) -> Option<String> {
        if self.is_discord_forbidden() {
            tracing::warn!("Discord refused request: {}", self);
            return Some("I don't have permission to do that here!".to_string());
        }

        match self {
            Self::AuthErr(err) => Some(err.user_message()),
            Self::GameErr(err) => err.user_message().map(str::to_string),
            Self::NotFound(msg) | Self::BadRequest(msg) => Some(msg),
            err => {
                tracing::error!("{}", err);
                Some(GENERIC_FAILURE.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_cell_is_silent() {
        let err = AppError::from(GameError::CellOccupied);
        assert_eq!(err.into_user_message(), None);
    }

    #[test]
    fn bad_request_message_is_passed_through() {
        let err = AppError::BadRequest("Invalid channel type.".to_string());
        assert_eq!(err.into_user_message().as_deref(), Some("Invalid channel type."));
    }

    #[test]
    fn database_errors_are_hidden_from_users() {
        let err = AppError::from(sea_orm::DbErr::Custom("connection reset".to_string()));
        assert_eq!(err.into_user_message().as_deref(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn auth_denial_names_the_missing_tier() {
        let err = AppError::from(AuthError::RequiresFullManagerTier);
        let message = err.into_user_message().unwrap();
        assert!(message.contains("BotManager"));
    }
}
