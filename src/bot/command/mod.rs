//! Slash command registry and dispatch.
//!
//! Every command the bot registers has an entry in `COMMANDS` carrying its help text
//! and, for privileged commands, the `CommandPolicy` the authorization gate enforces
//! before the command body runs.

pub mod applications;
pub mod args;
pub mod channels;
pub mod games;
pub mod moderation;
pub mod reply;
pub mod roles;
pub mod tickets;
pub mod utility;
pub mod warnings;

use std::collections::HashMap;

use serenity::all::{CommandInteraction, Context, CreateCommand, GuildId, Permissions, Role, RoleId, UserId};

use crate::{
    bot::command::{args::CommandArgs, reply::report_error},
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, CommandPolicy},
    model::auth::AuthorizationContext,
    state::BotState,
};

/// Help section a command is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Moderation,
    Roles,
    Channels,
    Tickets,
    Applications,
    Utility,
    Games,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::Moderation,
        Self::Roles,
        Self::Channels,
        Self::Tickets,
        Self::Applications,
        Self::Utility,
        Self::Games,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Moderation => "Moderation",
            Self::Roles => "Roles",
            Self::Channels => "Channels",
            Self::Tickets => "Tickets",
            Self::Applications => "Applications",
            Self::Utility => "Utility",
            Self::Games => "Games",
        }
    }
}

pub struct CommandInfo {
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// `None` for commands anyone can run.
    pub policy: Option<CommandPolicy>,
}

const fn command(
    name: &'static str,
    category: Category,
    description: &'static str,
    policy: Option<CommandPolicy>,
) -> CommandInfo {
    CommandInfo {
        name,
        category,
        description,
        policy,
    }
}

pub const COMMANDS: &[CommandInfo] = &[
    command(
        "kick",
        Category::Moderation,
        "Kick a member from the server",
        Some(CommandPolicy::full(Permissions::KICK_MEMBERS)),
    ),
    command(
        "ban",
        Category::Moderation,
        "Ban a member from the server",
        Some(CommandPolicy::full(Permissions::BAN_MEMBERS)),
    ),
    command(
        "timeout",
        Category::Moderation,
        "Timeout a member for a number of minutes",
        Some(CommandPolicy::any(Permissions::MODERATE_MEMBERS)),
    ),
    command(
        "warn",
        Category::Moderation,
        "Warn a member",
        Some(CommandPolicy::any(Permissions::MODERATE_MEMBERS)),
    ),
    command(
        "warnings",
        Category::Moderation,
        "Show a member's warnings",
        Some(CommandPolicy::any(Permissions::MODERATE_MEMBERS)),
    ),
    command(
        "create_role",
        Category::Roles,
        "Create a new role",
        Some(CommandPolicy::any(Permissions::MANAGE_ROLES)),
    ),
    command(
        "assign_role",
        Category::Roles,
        "Assign a role to a member",
        Some(CommandPolicy::any(Permissions::MANAGE_ROLES).managing_roles()),
    ),
    command(
        "remove_role",
        Category::Roles,
        "Remove a role from a member",
        Some(CommandPolicy::any(Permissions::MANAGE_ROLES).managing_roles()),
    ),
    command(
        "setup_bot_role",
        Category::Roles,
        "Create a BotManager role",
        Some(CommandPolicy::native_only(Permissions::MANAGE_ROLES)),
    ),
    command(
        "set_permissions",
        Category::Channels,
        "Set channel permissions for a role",
        Some(CommandPolicy::full(Permissions::MANAGE_CHANNELS)),
    ),
    command(
        "view_permissions",
        Category::Channels,
        "View a role's permissions in a channel",
        Some(CommandPolicy::full(Permissions::MANAGE_CHANNELS)),
    ),
    command(
        "lock",
        Category::Channels,
        "Lock a text channel",
        Some(CommandPolicy::any(Permissions::MANAGE_CHANNELS)),
    ),
    command(
        "unlock",
        Category::Channels,
        "Unlock a text channel",
        Some(CommandPolicy::any(Permissions::MANAGE_CHANNELS)),
    ),
    command(
        "create_channel",
        Category::Channels,
        "Create a new channel",
        Some(CommandPolicy::any(Permissions::MANAGE_CHANNELS)),
    ),
    command(
        "delete_channel",
        Category::Channels,
        "Delete a channel",
        Some(CommandPolicy::full(Permissions::MANAGE_CHANNELS)),
    ),
    command(
        "setup_tickets",
        Category::Tickets,
        "Set up the tickets category",
        Some(CommandPolicy::full(Permissions::MANAGE_CHANNELS)),
    ),
    command("ticket", Category::Tickets, "Create a support ticket", None),
    command(
        "set_application_channel",
        Category::Applications,
        "Set the channel where applications are sent",
        Some(CommandPolicy::full(Permissions::MANAGE_CHANNELS)),
    ),
    command("apply", Category::Applications, "Submit a server application", None),
    command(
        "say",
        Category::Utility,
        "Make the bot say something in a channel",
        Some(CommandPolicy::any(Permissions::MANAGE_MESSAGES)),
    ),
    command(
        "embed",
        Category::Utility,
        "Send an embed message to a channel",
        Some(CommandPolicy::full(Permissions::MANAGE_MESSAGES)),
    ),
    command("ping", Category::Utility, "Check the bot's latency", None),
    command("help", Category::Utility, "List the bot's commands", None),
    command("flip", Category::Games, "Flip a coin", None),
    command("tictactoe", Category::Games, "Start a game of Tic Tac Toe", None),
];

pub fn find(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|info| info.name == name)
}

/// Definitions of every slash command, for registration with Discord.
pub fn definitions() -> Vec<CreateCommand> {
    [
        moderation::register(),
        warnings::register(),
        roles::register(),
        channels::register(),
        tickets::register(),
        applications::register(),
        utility::register(),
        games::register(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Runs a slash command and reports any failure back to the invoking user.
pub async fn handle_command(ctx: &Context, state: &BotState, command: &CommandInteraction) {
    let name = command.data.name.as_str();
    tracing::debug!("Command /{} from {}", name, command.user.id);

    if let Err(err) = run_command(ctx, state, command).await {
        report_error(ctx, command, err).await;
    }
}

async fn run_command(
    ctx: &Context,
    state: &BotState,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let info = find(&command.data.name)
        .ok_or_else(|| AppError::NotFound("Unknown command.".to_string()))?;

    if let Some(policy) = info.policy {
        authorize_command(ctx, command, policy).await?;
    }

    match info.name {
        "kick" => moderation::kick(ctx, command).await,
        "ban" => moderation::ban(ctx, command).await,
        "timeout" => moderation::timeout(ctx, command).await,
        "warn" => warnings::warn(ctx, state, command).await,
        "warnings" => warnings::warnings(ctx, state, command).await,
        "create_role" => roles::create_role(ctx, command).await,
        "assign_role" => roles::assign_role(ctx, command).await,
        "remove_role" => roles::remove_role(ctx, command).await,
        "setup_bot_role" => roles::setup_bot_role(ctx, command).await,
        "set_permissions" => channels::set_permissions(ctx, command).await,
        "view_permissions" => channels::view_permissions(ctx, command).await,
        "lock" => channels::set_locked(ctx, command, true).await,
        "unlock" => channels::set_locked(ctx, command, false).await,
        "create_channel" => channels::create_channel(ctx, command).await,
        "delete_channel" => channels::delete_channel(ctx, command).await,
        "setup_tickets" => tickets::setup_tickets(ctx, command).await,
        "ticket" => tickets::create_ticket(ctx, command).await,
        "set_application_channel" => applications::set_application_channel(ctx, state, command).await,
        "apply" => applications::apply(ctx, command).await,
        "say" => utility::say(ctx, command).await,
        "embed" => utility::embed(ctx, command).await,
        "ping" => utility::ping(ctx, command).await,
        "help" => utility::help(ctx, command).await,
        "flip" => games::flip(ctx, command).await,
        "tictactoe" => games::tictactoe(ctx, state, command).await,
        _ => Err(AppError::NotFound("Unknown command.".to_string())),
    }
}

/// Evaluates a command's policy against the invoking member.
async fn authorize_command(
    ctx: &Context,
    command: &CommandInteraction,
    policy: CommandPolicy,
) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let member = command.member.as_deref().ok_or(AuthError::GuildOnly)?;

    let guild_roles = guild_id.roles(&ctx.http).await?;
    let context = AuthorizationContext::from_member_roles(
        command.user.id.get(),
        &member.roles,
        &guild_roles,
        member.permissions.unwrap_or_else(Permissions::empty),
    );

    let role_ranks = if policy.manages_roles {
        let target = CommandArgs::new(command).required_role("role")?;
        let bot_top = bot_top_role_position(ctx, guild_id, &guild_roles).await?;
        Some((target.position, bot_top))
    } else {
        None
    };

    match AuthGuard::new(&context).require(&policy.checks(role_ranks)) {
        Ok(tier) => {
            tracing::debug!(
                "Authorized /{} for {} (tier {:?})",
                command.data.name,
                command.user.id,
                tier
            );
            Ok(())
        }
        Err(err) => {
            tracing::info!(
                "Denied /{} for {}: {}",
                command.data.name,
                command.user.id,
                err
            );
            Err(err.into())
        }
    }
}

/// Current bot user id.
pub fn bot_user_id(ctx: &Context) -> UserId {
    ctx.cache.current_user().id
}

/// Highest position among the bot's roles in a guild (0 when it only has @everyone).
pub async fn bot_top_role_position(
    ctx: &Context,
    guild_id: GuildId,
    guild_roles: &HashMap<RoleId, Role>,
) -> Result<u16, AppError> {
    let bot = guild_id.member(ctx, bot_user_id(ctx)).await?;

    Ok(top_role_position(&bot.roles, guild_roles))
}

pub fn top_role_position(member_roles: &[RoleId], guild_roles: &HashMap<RoleId, Role>) -> u16 {
    member_roles
        .iter()
        .filter_map(|id| guild_roles.get(id))
        .map(|role| role.position)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_role;

    fn registered_names() -> Vec<String> {
        definitions()
            .iter()
            .map(|definition| {
                serde_json::to_value(definition).unwrap()["name"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn free_text_reasons_are_length_limited() {
        let mut limited = Vec::new();
        for definition in definitions() {
            let json = serde_json::to_value(&definition).unwrap();
            let Some(options) = json["options"].as_array() else {
                continue;
            };
            for option in options.iter().filter(|option| option["name"] == "reason") {
                assert_eq!(
                    option["max_length"],
                    crate::model::warning::MAX_REASON_LENGTH,
                    "/{} reason",
                    json["name"]
                );
                limited.push(json["name"].as_str().unwrap().to_string());
            }
        }

        for name in ["warn", "kick", "ban", "timeout", "ticket"] {
            assert!(limited.iter().any(|n| n == name), "/{name} has no reason option");
        }
    }

    #[test]
    fn every_registered_command_has_an_entry() {
        let names = registered_names();

        assert_eq!(names.len(), COMMANDS.len());
        for name in &names {
            assert!(find(name).is_some(), "/{name} has no registry entry");
        }
    }

    #[test]
    fn kick_and_ban_require_full_tier() {
        for name in ["kick", "ban", "set_permissions", "embed", "delete_channel"] {
            let policy = find(name).unwrap().policy.unwrap();
            assert_eq!(policy.tier, Some(crate::model::auth::TierRequirement::Full), "{name}");
        }
    }

    #[test]
    fn only_role_mutations_check_hierarchy() {
        let hierarchy: Vec<_> = COMMANDS
            .iter()
            .filter(|info| info.policy.is_some_and(|p| p.manages_roles))
            .map(|info| info.name)
            .collect();

        assert_eq!(hierarchy, vec!["assign_role", "remove_role"]);
    }

    #[test]
    fn open_commands_have_no_policy() {
        for name in ["ticket", "apply", "ping", "help", "flip", "tictactoe"] {
            assert!(find(name).unwrap().policy.is_none(), "{name}");
        }
    }

    #[test]
    fn top_role_position_ignores_unknown_roles() {
        let low = create_test_role(1, "Member", 0, 2);
        let high = create_test_role(2, "Sentinel", 0, 7);
        let guild_roles = HashMap::from([(low.id, low), (high.id, high)]);

        assert_eq!(
            top_role_position(&[RoleId::new(1), RoleId::new(2), RoleId::new(3)], &guild_roles),
            7
        );
        assert_eq!(top_role_position(&[], &guild_roles), 0);
    }
}
