//! Channel permission overwrites, locking and channel lifecycle.

use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, CommandOptionType, Context, CreateChannel,
    CreateCommand, CreateCommandOption, GuildChannel, PermissionOverwrite,
    PermissionOverwriteType, Permissions,
};

use crate::{
    bot::command::{args::CommandArgs, reply::reply},
    error::{auth::AuthError, AppError},
    util::permission::{
        effective_role_permissions, parse_overwrites, OverwriteChange, CHANNEL_PERMISSIONS,
    },
};

pub fn register() -> Vec<CreateCommand> {
    let text_channel = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Channel, "channel", description)
            .channel_types(vec![ChannelType::Text])
    };
    let role = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Role, "role", description).required(true)
    };

    vec![
        CreateCommand::new("set_permissions")
            .description("Set channel permissions for a role")
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .add_option(text_channel("Channel to modify").required(true))
            .add_option(role("Role to modify"))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "permissions",
                    "e.g. view=true send=false (view, send, read_history, manage, attach_files)",
                )
                .required(true),
            ),
        CreateCommand::new("view_permissions")
            .description("View a role's permissions in a channel")
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .add_option(text_channel("Channel to inspect").required(true))
            .add_option(role("Role to inspect")),
        CreateCommand::new("lock")
            .description("Lock a text channel")
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .add_option(text_channel("Channel to lock (defaults to this one)")),
        CreateCommand::new("unlock")
            .description("Unlock a text channel")
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .add_option(text_channel("Channel to unlock (defaults to this one)")),
        CreateCommand::new("create_channel")
            .description("Create a new channel")
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Channel name")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "type", "Channel type")
                    .add_string_choice("text", "text")
                    .add_string_choice("voice", "voice"),
            ),
        CreateCommand::new("delete_channel")
            .description("Delete a channel")
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .add_option(text_channel("Channel to delete").required(true)),
    ]
}

pub async fn set_permissions(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let args = CommandArgs::new(command);
    let target = args.required_channel("channel")?;
    let role = args.required_role("role")?;
    let change = parse_overwrites(args.required_string("permissions")?);

    if change.is_empty() {
        return Err(AppError::BadRequest(
            "❌ No valid permissions given. Available permissions: view, send, read_history, manage, attach_files"
                .to_string(),
        ));
    }

    let channel = guild_channel(ctx, target.id).await?;
    let kind = PermissionOverwriteType::Role(role.id);
    let merged = change.merge_into(existing_overwrite(&channel, kind));

    channel
        .id
        .create_permission(
            ctx,
            PermissionOverwrite {
                allow: merged.allow,
                deny: merged.deny,
                kind,
            },
        )
        .await?;

    tracing::info!(
        "{} updated permissions for {} in channel {}",
        command.user.name,
        role.name,
        channel.name
    );

    reply(
        ctx,
        command,
        format!(
            "✅ Updated permissions for <@&{}> in <#{}>:\n```\n{}\n```",
            role.id,
            channel.id,
            change.summary().join("\n")
        ),
    )
    .await
}

pub async fn view_permissions(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let target = args.required_channel("channel")?;
    let role = args.required_role("role")?;

    let channel = guild_channel(ctx, target.id).await?;
    let everyone = guild_id.everyone_role();
    let guild_roles = guild_id.roles(&ctx.http).await?;
    let everyone_base = guild_roles
        .get(&everyone)
        .map(|r| r.permissions)
        .unwrap_or_else(Permissions::empty);

    let role_overwrite = if role.id == everyone {
        None
    } else {
        existing_overwrite(&channel, PermissionOverwriteType::Role(role.id))
    };
    let perms = effective_role_permissions(
        everyone_base | role.permissions,
        existing_overwrite(&channel, PermissionOverwriteType::Role(everyone)),
        role_overwrite,
    );

    tracing::info!(
        "{} viewed permissions for {} in channel {}",
        command.user.name,
        role.name,
        channel.name
    );

    reply(
        ctx,
        command,
        format!(
            "📋 Permissions for <@&{}> in <#{}>:\n```\n{}\n```",
            role.id,
            channel.id,
            permission_lines(perms).join("\n")
        ),
    )
    .await
}

/// Denies (`locked`) or allows `@everyone` to send messages in a channel.
pub async fn set_locked(
    ctx: &Context,
    command: &CommandInteraction,
    locked: bool,
) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let channel_id = CommandArgs::new(command)
        .channel("channel")
        .map(|c| c.id)
        .unwrap_or(command.channel_id);

    let channel = guild_channel(ctx, channel_id).await?;
    let kind = PermissionOverwriteType::Role(guild_id.everyone_role());
    let change = if locked {
        OverwriteChange {
            allow: Permissions::empty(),
            deny: Permissions::SEND_MESSAGES,
        }
    } else {
        OverwriteChange {
            allow: Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
        }
    };
    let merged = change.merge_into(existing_overwrite(&channel, kind));

    channel
        .id
        .create_permission(
            ctx,
            PermissionOverwrite {
                allow: merged.allow,
                deny: merged.deny,
                kind,
            },
        )
        .await?;

    let (icon, verb) = if locked {
        ("🔒", "locked")
    } else {
        ("🔓", "unlocked")
    };
    tracing::info!("{} {} channel {}", command.user.name, verb, channel.name);

    reply(
        ctx,
        command,
        format!("{} Channel <#{}> has been {}.", icon, channel.id, verb),
    )
    .await
}

pub async fn create_channel(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let name = args.required_string("name")?;
    let kind = channel_kind(args.string("type"))?;

    let channel = guild_id
        .create_channel(ctx, CreateChannel::new(name).kind(kind))
        .await?;

    tracing::info!(
        "{} created channel {} of type {:?}",
        command.user.name,
        channel.name,
        kind
    );

    reply(ctx, command, format!("Channel <#{}> has been created!", channel.id)).await
}

/// Deleting the invoking channel would leave nowhere to answer, so that case
/// confirms before the deletion.
fn replies_before_delete(target: ChannelId, invoking: ChannelId) -> bool {
    target == invoking
}

pub async fn delete_channel(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let target = CommandArgs::new(command).required_channel("channel")?;
    let name = target.name.clone().unwrap_or_else(|| target.id.to_string());
    let confirmation = format!("Channel {} has been deleted!", name);

    if replies_before_delete(target.id, command.channel_id) {
        reply(ctx, command, confirmation).await?;
        target.id.delete(ctx).await?;
    } else {
        target.id.delete(ctx).await?;
        reply(ctx, command, confirmation).await?;
    }

    tracing::info!("{} deleted channel {}", command.user.name, name);

    Ok(())
}

async fn guild_channel(ctx: &Context, channel_id: ChannelId) -> Result<GuildChannel, AppError> {
    channel_id
        .to_channel(ctx)
        .await?
        .guild()
        .ok_or_else(|| AppError::BadRequest("That is not a server channel.".to_string()))
}

fn existing_overwrite(
    channel: &GuildChannel,
    kind: PermissionOverwriteType,
) -> Option<OverwriteChange> {
    channel
        .permission_overwrites
        .iter()
        .find(|overwrite| overwrite.kind == kind)
        .map(|overwrite| OverwriteChange {
            allow: overwrite.allow,
            deny: overwrite.deny,
        })
}

fn permission_lines(perms: Permissions) -> Vec<String> {
    CHANNEL_PERMISSIONS
        .iter()
        .map(|(_, bit, label)| format!("{}: {}", label, perms.contains(*bit)))
        .collect()
}

fn channel_kind(kind: Option<&str>) -> Result<ChannelType, AppError> {
    match kind.map(str::to_lowercase).as_deref() {
        None | Some("text") => Ok(ChannelType::Text),
        Some("voice") => Ok(ChannelType::Voice),
        Some(_) => Err(AppError::BadRequest(
            "Invalid channel type. Use 'text' or 'voice'.".to_string(),
        )),
    }
}
