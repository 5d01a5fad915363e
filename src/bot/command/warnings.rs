//! Warning issuance and history.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateMessage, Mentionable, Permissions, UserId,
};

use crate::{
    bot::{
        command::{args::CommandArgs, reply::reply_embed},
        render::embed::{create_embed, create_error_embed, create_warning_embed, truncate, ORANGE},
    },
    error::{auth::AuthError, AppError},
    model::warning::{CreateWarningParam, Warning, MAX_REASON_LENGTH, NO_REASON},
    service::warning::WarningService,
    state::BotState,
};

pub fn register() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("warn")
            .description("Warn a member")
            .default_member_permissions(Permissions::MODERATE_MEMBERS)
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Member to warn")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for the warning")
                    .max_length(MAX_REASON_LENGTH),
            ),
        CreateCommand::new("warnings")
            .description("Show a member's warnings")
            .default_member_permissions(Permissions::MODERATE_MEMBERS)
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Member to look up")
                    .required(true),
            ),
    ]
}

/// Records a warning, announces it and notifies the warned member by DM.
pub async fn warn(
    ctx: &Context,
    state: &BotState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let member = args.required_user("member")?;
    let reason = args.string("reason");

    let issued = WarningService::new(&state.db)
        .issue(CreateWarningParam {
            guild_id: guild_id.get(),
            user_id: member.id.get(),
            moderator_id: command.user.id.get(),
            reason: reason.map(str::to_string),
        })
        .await?;

    reply_embed(
        ctx,
        command,
        create_warning_embed(member, reason, &command.user, issued.total),
        false,
    )
    .await?;

    let guild_name = guild_id
        .name(&ctx.cache)
        .unwrap_or_else(|| "this server".to_string());
    let dm = create_error_embed(
        "You have been warned",
        format!(
            "You received a warning in {}\nReason: {}",
            guild_name,
            reason.unwrap_or(NO_REASON)
        ),
    );
    if let Err(e) = member
        .direct_message(ctx, CreateMessage::new().embed(dm))
        .await
    {
        tracing::warn!("Could not send DM to {}: {}", member.name, e);
    }

    tracing::info!(
        "{} warned {} for reason: {:?}",
        command.user.name,
        member.name,
        reason
    );

    Ok(())
}

/// Lists a member's warning total and most recent warnings.
pub async fn warnings(
    ctx: &Context,
    state: &BotState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let member = CommandArgs::new(command).required_user("member")?;

    let (total, recent) = WarningService::new(&state.db)
        .history(guild_id.get(), member.id.get())
        .await?;

    let embed = create_embed(
        format!("Warnings for {}", member.name),
        history_description(total, &recent),
        ORANGE,
    );

    reply_embed(ctx, command, embed, true).await
}

/// Longest reason shown per line of the history, keeping ten lines within an
/// embed description.
const HISTORY_REASON_PREVIEW: usize = 300;

fn history_description(total: u64, recent: &[Warning]) -> String {
    if total == 0 {
        return "This member has no warnings.".to_string();
    }

    let mut lines = vec![format!("Total warnings: **{}**", total)];
    lines.extend(recent.iter().map(|warning| {
        format!(
            "<t:{}:d> by {}: {}",
            warning.created_at.timestamp(),
            UserId::new(warning.moderator_id).mention(),
            truncate(warning.reason_or_default(), HISTORY_REASON_PREVIEW)
        )
    }));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const DESCRIPTION_LIMIT: usize = 4096;

    fn warning(reason: Option<&str>) -> Warning {
        Warning {
            id: 1,
            guild_id: 1,
            user_id: 42,
            moderator_id: 7,
            reason: reason.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn describes_empty_history() {
        assert_eq!(history_description(0, &[]), "This member has no warnings.");
    }

    #[test]
    fn lists_total_and_recent_warnings() {
        let text = history_description(2, &[warning(Some("spam")), warning(None)]);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Total warnings: **2**");
        assert_eq!(lines[1], "<t:1772366400:d> by <@7>: spam");
        assert_eq!(lines[2], "<t:1772366400:d> by <@7>: No reason provided");
    }

    #[test]
    fn long_reasons_keep_history_within_description_limit() {
        let reason = "x".repeat(1000);
        let recent: Vec<Warning> = (0..10).map(|_| warning(Some(&reason))).collect();

        let text = history_description(25, &recent);

        assert!(text.chars().count() <= DESCRIPTION_LIMIT);
        assert!(text.lines().nth(1).unwrap().ends_with('…'));
    }
}
