//! Role creation, assignment and BotManager role bootstrap.

use std::collections::HashMap;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption, EditRole,
    Mentionable, Permissions, Role, RoleId,
};

use crate::{
    bot::{
        command::{args::CommandArgs, bot_user_id, reply::reply, top_role_position},
        render::embed::BLUE,
    },
    error::{auth::AuthError, AppError},
    model::auth::ManagerTier,
};

pub fn register() -> Vec<CreateCommand> {
    let member = |description: &str| {
        CreateCommandOption::new(CommandOptionType::User, "member", description).required(true)
    };
    let role = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Role, "role", description).required(true)
    };

    vec![
        CreateCommand::new("create_role")
            .description("Create a new role")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Name of the role")
                    .required(true),
            ),
        CreateCommand::new("assign_role")
            .description("Assign a role to a member")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(member("Member to receive the role"))
            .add_option(role("Role to assign")),
        CreateCommand::new("remove_role")
            .description("Remove a role from a member")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(member("Member to remove the role from"))
            .add_option(role("Role to remove")),
        CreateCommand::new("setup_bot_role")
            .description("Create a BotManager role")
            .default_member_permissions(Permissions::MANAGE_ROLES)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "tier",
                    "1 for full access (default), 2 for limited access",
                )
                .add_int_choice("1 - BotManager", 1)
                .add_int_choice("2 - BotManager 2", 2),
            ),
    ]
}

pub async fn create_role(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let name = CommandArgs::new(command).required_string("name")?;

    let role = guild_id
        .create_role(ctx, EditRole::new().name(name))
        .await?;

    tracing::info!("{} created role {}", command.user.name, role.name);

    reply(ctx, command, format!("Role {} has been created!", role.name)).await
}

pub async fn assign_role(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let member = args.required_user("member")?;
    let role = args.required_role("role")?;

    ctx.http
        .add_member_role(guild_id, member.id, role.id, Some(&audit_reason(command)))
        .await?;

    tracing::info!(
        "{} assigned role {} to {}",
        command.user.name,
        role.name,
        member.name
    );

    reply(
        ctx,
        command,
        format!("Role {} has been assigned to {}!", role.name, member.name),
    )
    .await
}

pub async fn remove_role(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let args = CommandArgs::new(command);
    let member = args.required_user("member")?;
    let role = args.required_role("role")?;

    ctx.http
        .remove_member_role(guild_id, member.id, role.id, Some(&audit_reason(command)))
        .await?;

    tracing::info!(
        "{} removed role {} from {}",
        command.user.name,
        role.name,
        member.name
    );

    reply(
        ctx,
        command,
        format!("Role {} has been removed from {}!", role.name, member.name),
    )
    .await
}

fn audit_reason(command: &CommandInteraction) -> String {
    format!("Requested by {}", command.user.name)
}

/// Creates the `BotManager` (tier 1) or `BotManager 2` (tier 2) role.
pub async fn setup_bot_role(ctx: &Context, command: &CommandInteraction) -> Result<(), AppError> {
    let guild_id = command.guild_id.ok_or(AuthError::GuildOnly)?;
    let number = CommandArgs::new(command).integer("tier").unwrap_or(1);

    let Some(tier) = ManagerTier::from_number(number) else {
        tracing::warn!(
            "{} attempted to create invalid BotManager role number: {}",
            command.user.name,
            number
        );
        return Err(AppError::BadRequest(
            "❌ Role number must be either 1 or 2!".to_string(),
        ));
    };

    let guild_roles = guild_id.roles(&ctx.http).await?;
    let bot_member = guild_id.member(ctx, bot_user_id(ctx)).await?;
    let bot_permissions = guild_permissions(&bot_member.roles, guild_id.everyone_role(), &guild_roles);
    let bot_top = top_role_position(&bot_member.roles, &guild_roles);

    let existing: Vec<&Role> = guild_roles.values().collect();
    check_bot_role_setup(tier, &existing, bot_permissions, bot_top)?;

    let role = guild_id
        .create_role(
            ctx,
            EditRole::new()
                .name(tier.role_name())
                .colour(BLUE)
                .permissions(tier.role_permissions())
                .audit_log_reason(&format!(
                    "Role {} for managing bot commands",
                    tier.number()
                )),
        )
        .await?;

    tracing::info!(
        "{} created {} role in guild {}",
        command.user.name,
        tier.role_name(),
        guild_id
    );

    reply(ctx, command, bot_role_created_message(tier, &role.mention().to_string())).await
}

/// Guild-level permissions granted by a member's roles plus `@everyone`.
fn guild_permissions(
    member_roles: &[RoleId],
    everyone: RoleId,
    guild_roles: &HashMap<RoleId, Role>,
) -> Permissions {
    member_roles
        .iter()
        .chain(std::iter::once(&everyone))
        .filter_map(|id| guild_roles.get(id))
        .fold(Permissions::empty(), |acc, role| acc | role.permissions)
}

/// Preconditions for creating a manager role.
fn check_bot_role_setup(
    tier: ManagerTier,
    guild_roles: &[&Role],
    bot_permissions: Permissions,
    bot_top: u16,
) -> Result<(), AppError> {
    if guild_roles.iter().any(|role| role.name == tier.role_name()) {
        return Err(AppError::BadRequest(format!(
            "⚠️ {} role already exists!",
            tier.role_name()
        )));
    }

    if !bot_permissions.administrator() && !bot_permissions.manage_roles() {
        return Err(AppError::BadRequest(
            "❌ I don't have permission to manage roles!".to_string(),
        ));
    }

    if bot_top <= 1 {
        return Err(AppError::BadRequest(
            "❌ Please move my role higher in the hierarchy to manage roles!".to_string(),
        ));
    }

    Ok(())
}

fn bot_role_created_message(tier: ManagerTier, role_mention: &str) -> String {
    let access = match tier {
        ManagerTier::Full => "Full moderation access",
        ManagerTier::Limited => "Basic moderation access",
    };

    format!(
        "✅ Created {} role successfully!\n\
         This role has the following permissions:\n\
         • {}\n\
         • Manage messages and channels\n\
         • Manage roles below its position\n\n\
         Assign this role to users who should manage bot features.",
        role_mention, access
    )
}
