//! Discord bot integration.
//!
//! The bot is driven entirely by gateway events: `ready` sets the presence and
//! registers the slash commands, `interaction_create` routes slash commands, button
//! presses and modal submissions to the command modules.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild, channel and role data
//! - `GUILD_MEMBERS` - Resolve members for moderation and role hierarchy checks
//!   (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod render;
pub mod start;
