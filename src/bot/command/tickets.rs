//! Private support tickets.
//!
//! Tickets live as `ticket-<username>` text channels under a `Tickets` category
//! that only the bot and the manager roles can see. The opener of a ticket is
//! granted access to their own channel.

use std::time::Duration;

use serenity::all::{
    ButtonStyle, ChannelType, CommandInteraction, CommandOptionType,
    ComponentInteraction, Context, CreateActionRow, CreateButton, CreateChannel, CreateCommand,
    CreateCommandOption, CreateEmbedFooter, CreateMessage, GuildChannel, GuildId,
    PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId,
};

use crate::{
    bot::{
        command::{
            args::CommandArgs,
            bot_user_id,
            reply::{reply, reply_ephemeral},
        },
        render::embed::{create_embed, BLUE},
    },
    error::{auth::AuthError, AppError},
    model::{auth::ManagerTier, warning::MAX_REASON_LENGTH},
};

pub const TICKETS_CATEGORY: &str = "Tickets";
pub const TICKET_CHANNEL_PREFIX: &str = "ticket-";
pub const CLOSE_TICKET_ID: &str = "close_ticket";
const CLOSE_DELAY: Duration = Duration::from_secs(5);

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("setup_tickets")
            .description("Set up the tickets category and permissions")
            .default_member_permissions(Permissions::MANAGE_CHANNELS),
        CreateCommand::new("ticket")
            .description("Create a support ticket")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "reason", "What do you need help with?")
                    .required(true)
                    .max_length(MAX_REASON_LENGTH),
            ),
    ]
}

pub async fn setup_tickets(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;

    if find_category(ctx, guild_id).await?.is_some() {
        return Err(AppError::BadRequest(
            "❌ Tickets category already exists!".to_string(),
        ));
    }

    let overwrites = ticket_overwrites(
        guild_id.everyone_role(),
        bot_user_id(ctx),
        &manager_roles(ctx, guild_id).await?,
        None,
    );
    guild_id
        .create_channel(
            ctx,
            CreateChannel::new(TICKETS_CATEGORY)
                .kind(ChannelType::Category)
                .permissions(overwrites),
        )
        .await?;

    tracing::info!("Tickets category created by {}", command.user.name);

    reply(ctx, command, "✅ Tickets category created successfully!").await
}

pub async fn create_ticket(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let reason = CommandArgs::new(command).required_string("reason")?;

    let category = find_category(ctx, guild_id).await?.ok_or_else(|| {
        AppError::NotFound(
            "❌ Tickets category not found. Ask an admin to set it up using /setup_tickets"
                .to_string(),
        )
    })?;

    let name = ticket_channel_name(&command.user.name);
    let existing = guild_id
        .channels(&ctx.http)
        .await?
        .into_values()
        .find(|channel| channel.parent_id == Some(category.id) && channel.name == name);
    if let Some(existing) = existing {
        return Err(AppError::BadRequest(format!(
            "❌ You already have an open ticket: <#{}>",
            existing.id
        )));
    }

    let overwrites = ticket_overwrites(
        guild_id.everyone_role(),
        bot_user_id(ctx),
        &manager_roles(ctx, guild_id).await?,
        Some(command.user.id),
    );
    let channel = guild_id
        .create_channel(
            ctx,
            CreateChannel::new(name)
                .kind(ChannelType::Text)
                .category(category.id)
                .permissions(overwrites),
        )
        .await?;

    let embed = create_embed(
        "Support Ticket",
        format!("Ticket created by <@{}>\nReason: {}", command.user.id, reason),
        BLUE,
    )
    .footer(CreateEmbedFooter::new(format!("User ID: {}", command.user.id)));
    let close = CreateButton::new(CLOSE_TICKET_ID)
        .label("Close Ticket")
        .style(ButtonStyle::Danger);

    let opened = channel
        .id
        .send_message(
            ctx,
            CreateMessage::new()
                .embed(embed)
                .components(vec![CreateActionRow::Buttons(vec![close])]),
        )
        .await;
    if let Err(e) = opened {
        if let Err(cleanup) = channel.id.delete(ctx).await {
            tracing::error!("Failed to remove ticket channel {}: {}", channel.name, cleanup);
        }
        return Err(e.into());
    }

    tracing::info!("Ticket created by {} for reason: {}", command.user.name, reason);

    reply_ephemeral(
        ctx,
        command,
        format!("✅ Ticket created! Check <#{}>", channel.id),
    )
    .await
}

/// Handles the Close Ticket button: announces the closure and deletes the
/// channel after a short delay.
pub async fn handle_close(ctx: &Context, component: &ComponentInteraction) -> Result<(), AppError> {
    let channel_id = component.channel_id;
    let channel = channel_id.to_channel(ctx).await?.guild();

    if !channel.is_some_and(|c| is_ticket_channel(&c.name)) {
        return reply_ephemeral(ctx, component, "This is not a ticket channel!").await;
    }

    reply(ctx, component, "🔒 Closing ticket in 5 seconds...").await?;
    channel_id
        .say(ctx, format!("Ticket closed by <@{}>", component.user.id))
        .await?;

    tracing::info!("Ticket {} closed by {}", channel_id, component.user.name);

    let ctx = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(CLOSE_DELAY).await;
        if let Err(e) = channel_id.delete(&ctx).await {
            tracing::error!("Failed to delete ticket channel {}: {}", channel_id, e);
        }
    });

    Ok(())
}

async fn find_category(ctx: &Context, guild_id: GuildId) -> Result<Option<GuildChannel>, AppError> {
    Ok(guild_id
        .channels(&ctx.http)
        .await?
        .into_values()
        .find(|channel| channel.kind == ChannelType::Category && channel.name == TICKETS_CATEGORY))
}

async fn manager_roles(ctx: &Context, guild_id: GuildId) -> Result<Vec<RoleId>, AppError> {
    Ok(guild_id
        .roles(&ctx.http)
        .await?
        .into_values()
        .filter(|role| ManagerTier::from_role_name(&role.name).is_some())
        .map(|role| role.id)
        .collect())
}

/// `ticket-<username>` the way Discord normalises text channel names.
pub fn ticket_channel_name(username: &str) -> String {
    let name: Vec<String> = username
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    format!("{}{}", TICKET_CHANNEL_PREFIX, name.join("-"))
}

pub fn is_ticket_channel(name: &str) -> bool {
    name.starts_with(TICKET_CHANNEL_PREFIX)
}

/// Hides the channel from `@everyone` and opens it to the bot, manager roles and
/// the ticket opener (if any).
fn ticket_overwrites(
    everyone: RoleId,
    bot: UserId,
    managers: &[RoleId],
    opener: Option<UserId>,
) -> Vec<PermissionOverwrite> {
    let participant = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES;

    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(everyone),
        },
        PermissionOverwrite {
            allow: participant | Permissions::MANAGE_CHANNELS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot),
        },
    ];

    overwrites.extend(
        managers
            .iter()
            .map(|role| PermissionOverwrite {
                allow: participant,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Role(*role),
            })
            .chain(opener.map(|user| PermissionOverwrite {
                allow: participant,
                deny: Permissions::empty(),
                kind: PermissionOverwriteType::Member(user),
            })),
    );

    overwrites
}
