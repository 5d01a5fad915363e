//! Ready event handler for bot initialization.
//!
//! Fired once the bot has connected to Discord's gateway. Sets the bot's presence
//! and registers the slash commands, either globally or to a single development
//! guild.

use serenity::all::{ActivityData, Command, Context, GuildId, OnlineStatus, Ready};

use crate::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context for presence and command registration
/// - `ready` - Ready event data containing bot user information
/// - `command_guild_id` - Register commands to this guild only when set
pub async fn handle_ready(ctx: Context, ready: Ready, command_guild_id: Option<u64>) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_presence(
        Some(ActivityData::listening("1nfern0 <3")),
        OnlineStatus::DoNotDisturb,
    );

    let definitions = command::definitions();
    let registered = match command_guild_id {
        Some(guild_id) => GuildId::new(guild_id)
            .set_commands(&ctx.http, definitions)
            .await
            .map(|commands| (commands.len(), format!("guild {}", guild_id))),
        None => Command::set_global_commands(&ctx.http, definitions)
            .await
            .map(|commands| (commands.len(), "all guilds".to_string())),
    };

    match registered {
        Ok((count, scope)) => tracing::info!("Registered {} slash commands for {}", count, scope),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
