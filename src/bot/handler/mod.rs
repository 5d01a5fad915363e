use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::state::BotState;

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: BotState,
    /// Guild to register commands to instead of registering them globally.
    pub command_guild_id: Option<u64>,
}

impl Handler {
    pub fn new(state: BotState, command_guild_id: Option<u64>) -> Self {
        Self {
            state,
            command_guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready, self.command_guild_id).await;
    }

    /// Called for slash commands, button presses and modal submissions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.state, ctx, interaction).await;
    }
}
