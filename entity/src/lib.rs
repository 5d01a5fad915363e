//! SeaORM entities for the moderation bot's persistent storage.

pub mod prelude;

pub mod guild;
pub mod guild_settings;
pub mod warning;
