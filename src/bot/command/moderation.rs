//! Kick, ban and timeout.

use chrono::{Duration, Utc};
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption, EditMember,
    Permissions,
};

use crate::{
    bot::command::{args::CommandArgs, reply::reply},
    error::{auth::AuthError, AppError},
    model::warning::{MAX_REASON_LENGTH, NO_REASON},
};

/// Longest timeout Discord accepts (28 days).
pub const MAX_TIMEOUT_MINUTES: i64 = 28 * 24 * 60;

pub fn register() -> Vec<CreateCommand> {
    let member = |description: &str| {
        CreateCommandOption::new(CommandOptionType::User, "member", description).required(true)
    };
    let reason = || {
        CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for the action")
            .max_length(MAX_REASON_LENGTH)
    };

    vec![
        CreateCommand::new("kick")
            .description("Kick a member from the server")
            .default_member_permissions(Permissions::KICK_MEMBERS)
            .add_option(member("Member to kick"))
            .add_option(reason()),
        CreateCommand::new("ban")
            .description("Ban a member from the server")
            .default_member_permissions(Permissions::BAN_MEMBERS)
            .add_option(member("Member to ban"))
            .add_option(reason()),
        CreateCommand::new("timeout")
            .description("Timeout a member for a number of minutes")
            .default_member_permissions(Permissions::MODERATE_MEMBERS)
            .add_option(member("Member to timeout"))
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "minutes", "Duration in minutes")
                    .required(true)
                    .min_int_value(1)
                    .max_int_value(MAX_TIMEOUT_MINUTES as u64),
            )
            .add_option(reason()),
    ]
}

pub async fn kick(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let member = args.required_user("member")?;
    let reason = args.string("reason");

    match reason {
        Some(reason) => guild_id.kick_with_reason(&ctx.http, member.id, reason).await?,
        None => guild_id.kick(&ctx.http, member.id).await?,
    }

    tracing::info!("{} kicked {} for reason: {:?}", command.user.name, member.name, reason);

    reply(
        ctx,
        command,
        format!("{} has been kicked. Reason: {}", member.name, reason.unwrap_or(NO_REASON)),
    )
    .await
}

pub async fn ban(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let member = args.required_user("member")?;
    let reason = args.string("reason");

    match reason {
        Some(reason) => guild_id.ban_with_reason(&ctx.http, member.id, 0, reason).await?,
        None => guild_id.ban(&ctx.http, member.id, 0).await?,
    }

    tracing::info!("{} banned {} for reason: {:?}", command.user.name, member.name, reason);

    reply(
        ctx,
        command,
        format!("{} has been banned. Reason: {}", member.name, reason.unwrap_or(NO_REASON)),
    )
    .await
}

pub async fn timeout(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let member = args.required_user("member")?;
    let minutes = args.required_integer("minutes")?;
    let reason = args.string("reason");

    let until = timeout_until(minutes)?;
    let mut edit = EditMember::new().disable_communication_until(until);
    if let Some(reason) = reason {
        edit = edit.audit_log_reason(reason);
    }
    guild_id.edit_member(ctx, member.id, edit).await?;

    tracing::info!(
        "{} timed out {} for {} minutes. Reason: {:?}",
        command.user.name,
        member.name,
        minutes,
        reason
    );

    reply(
        ctx,
        command,
        format!(
            "{} has been timed out for {} minutes. Reason: {}",
            member.name,
            minutes,
            reason.unwrap_or(NO_REASON)
        ),
    )
    .await
}

/// RFC 3339 timestamp `minutes` from now, validated against Discord's limits.
fn timeout_until(minutes: i64) -> Result<String, AppError> {
    if !(1..=MAX_TIMEOUT_MINUTES).contains(&minutes) {
        return Err(AppError::BadRequest(format!(
            "Timeout must be between 1 and {} minutes.",
            MAX_TIMEOUT_MINUTES
        )));
    }

    Ok((Utc::now() + Duration::minutes(minutes)).to_rfc3339())
}
