//! Builders for the messages, embeds and buttons the bot sends.

pub mod embed;
pub mod game;
