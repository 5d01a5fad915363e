//! State shared by every event and interaction handler.

use sea_orm::DatabaseConnection;

use crate::service::game::GameRegistry;

/// Shared resources handed to the bot's event handler.
///
/// Both fields are cheap to clone: the connection is a pool and the registry wraps
/// its map in an `Arc`.
#[derive(Clone)]
pub struct BotState {
    /// Database connection pool for warnings and guild settings.
    pub db: DatabaseConnection,

    /// Active tic-tac-toe sessions, one per channel.
    pub games: GameRegistry,
}

impl BotState {
    pub fn new(db: DatabaseConnection, games: GameRegistry) -> Self {
        Self { db, games }
    }
}
