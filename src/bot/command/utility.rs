//! Messaging helpers, latency check and the command overview.

use std::time::Instant;

use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse, Permissions,
};

use crate::{
    bot::{
        command::{
            args::CommandArgs,
            find,
            reply::{reply_embed, reply_ephemeral},
            Category, CommandInfo, COMMANDS,
        },
        render::embed::{parse_embed_color, BLUE, EMBED_COLORS},
    },
    error::AppError,
    model::auth::TierRequirement,
};

pub fn register() -> Vec<CreateCommand> {
    let channel = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Channel, "channel", description)
            .channel_types(vec![ChannelType::Text])
            .required(true)
    };
    let color = EMBED_COLORS.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "color", "Embed color (default blue)"),
        |option, (name, _)| option.add_string_choice(*name, *name),
    );

    vec![
        CreateCommand::new("say")
            .description("Make the bot say something in a channel")
            .default_member_permissions(Permissions::MANAGE_MESSAGES)
            .add_option(channel("Channel to send the message to"))
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "message", "Message to send")
                    .required(true),
            ),
        CreateCommand::new("embed")
            .description("Send an embed message to a channel")
            .default_member_permissions(Permissions::MANAGE_MESSAGES)
            .add_option(channel("Channel to send the embed to"))
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "title", "Embed title")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "description", "Embed text")
                    .required(true),
            )
            .add_option(color),
        CreateCommand::new("ping").description("Check the bot's latency"),
        CreateCommand::new("help")
            .description("List the bot's commands")
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "command",
                "Show details for one command",
            )),
    ]
}

pub async fn say(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let args = CommandArgs::new(command);
    let channel = args.required_channel("channel")?;
    let message = args.required_string("message")?;

    channel.id.say(ctx, message).await?;

    tracing::info!(
        "{} used say command in {}",
        command.user.name,
        channel.name.as_deref().unwrap_or_default()
    );

    reply_ephemeral(ctx, command, format!("✅ Message sent to <#{}>", channel.id)).await
}

pub async fn embed(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let args = CommandArgs::new(command);
    let channel = args.required_channel("channel")?;
    let title = args.required_string("title")?;
    let description = args.required_string("description")?;
    let color = args.string("color");

    let embed = CreateEmbed::new()
        .title(title)
        .description(description)
        .colour(parse_embed_color(color))
        .footer(CreateEmbedFooter::new(format!("Created by {}", command.user.name)));

    channel
        .id
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await?;

    tracing::info!(
        "{} created a {} embed in {}",
        command.user.name,
        color.unwrap_or("blue"),
        channel.name.as_deref().unwrap_or_default()
    );

    reply_ephemeral(ctx, command, format!("✅ Embed sent to <#{}>", channel.id)).await
}

/// Measures the round trip of an interaction response.
pub async fn ping(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let start = Instant::now();
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content("Pong!")),
        )
        .await?;
    let latency = start.elapsed().as_millis();

    command
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().content(format!("Pong! Latency: {}ms", latency)),
        )
        .await?;

    Ok(())
}

pub async fn help(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let embed = match CommandArgs::new(command).string("command") {
        Some(name) => {
            let info = find(name.trim_start_matches('/')).ok_or_else(|| {
                AppError::NotFound(format!("No command named `{}`.", name))
            })?;
            command_help_embed(info)
        }
        None => help_embed(),
    };

    reply_embed(ctx, command, embed, true).await
}

fn help_embed() -> CreateEmbed {
    Category::ALL
        .iter()
        .fold(CreateEmbed::new().title("Bot Commands").colour(BLUE), |embed, category| {
            let names: Vec<String> = COMMANDS
                .iter()
                .filter(|info| info.category == *category)
                .map(|info| format!("`/{}`", info.name))
                .collect();

            if names.is_empty() {
                embed
            } else {
                embed.field(category.title(), names.join(", "), false)
            }
        })
        .footer(CreateEmbedFooter::new(
            "Use /help <command> for more details about a command",
        ))
}

fn command_help_embed(info: &CommandInfo) -> CreateEmbed {
    let access = match info.policy {
        None => "Everyone".to_string(),
        Some(policy) => match policy.tier {
            Some(TierRequirement::Full) => "BotManager".to_string(),
            Some(TierRequirement::Any) => {
                "BotManager or BotManager 2".to_string()
            }
            None => "Discord permissions only".to_string(),
        },
    };

    CreateEmbed::new()
        .title(format!("Command: /{}", info.name))
        .colour(BLUE)
        .field("Description", info.description, false)
        .field("Category", info.category.title(), true)
        .field("Access", access, true)
}
