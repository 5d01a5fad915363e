//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models, converting
//! at this boundary. Discord snowflakes are stored as strings.

pub mod guild;
pub mod guild_settings;
pub mod warning;

#[cfg(test)]
mod test;
