//! Authorization domain models.
//!
//! Manager tiers are plain guild roles recognised by name. An
//! `AuthorizationContext` captures what the gate needs to know about the actor for a
//! single command attempt and is discarded afterwards.

use serenity::all::{Permissions, Role, RoleId};
use std::collections::HashMap;

/// Custom authorization level layered on top of Discord permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerTier {
    /// Tier 1, full manager privileges.
    Full,
    /// Tier 2, limited manager privileges.
    Limited,
}

impl ManagerTier {
    /// Name of the guild role that grants this tier.
    pub fn role_name(self) -> &'static str {
        match self {
            Self::Full => "BotManager",
            Self::Limited => "BotManager 2",
        }
    }

    pub fn from_role_name(name: &str) -> Option<Self> {
        [Self::Full, Self::Limited]
            .into_iter()
            .find(|tier| tier.role_name() == name)
    }

    /// Tier by its user-facing number (1 = full, 2 = limited).
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(Self::Full),
            2 => Some(Self::Limited),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::Full => 1,
            Self::Limited => 2,
        }
    }

    /// Discord permissions granted to the role when the bot creates it.
    pub fn role_permissions(self) -> Permissions {
        let base =
            Permissions::MANAGE_MESSAGES | Permissions::MANAGE_CHANNELS | Permissions::MANAGE_ROLES;
        match self {
            Self::Full => base | Permissions::KICK_MEMBERS | Permissions::BAN_MEMBERS,
            Self::Limited => base,
        }
    }
}

/// Which manager tiers satisfy a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierRequirement {
    /// Only Tier 1.
    Full,
    /// Tier 1 or Tier 2.
    Any,
}

/// Everything the authorization gate knows about the acting member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    /// Discord ID of the acting user.
    pub actor_id: u64,
    /// Names of the guild roles the actor holds.
    pub role_names: Vec<String>,
    /// Permissions computed by Discord for the actor in the invoking channel.
    pub permissions: Permissions,
}

impl AuthorizationContext {
    pub fn new(actor_id: u64, role_names: Vec<String>, permissions: Permissions) -> Self {
        Self {
            actor_id,
            role_names,
            permissions,
        }
    }

    /// Builds a context by resolving the member's role ids against the guild's roles.
    ///
    /// Role ids missing from `guild_roles` (deleted roles, stale cache) are skipped.
    pub fn from_member_roles(
        actor_id: u64,
        member_roles: &[RoleId],
        guild_roles: &HashMap<RoleId, Role>,
        permissions: Permissions,
    ) -> Self {
        let role_names = member_roles
            .iter()
            .filter_map(|id| guild_roles.get(id))
            .map(|role| role.name.clone())
            .collect();

        Self::new(actor_id, role_names, permissions)
    }

    /// Whether the computed permissions include `required`. Administrator implies all.
    pub fn has_native(&self, required: Permissions) -> bool {
        self.permissions.administrator() || self.permissions.contains(required)
    }

    pub fn holds(&self, tier: ManagerTier) -> bool {
        self.role_names.iter().any(|name| name == tier.role_name())
    }

    /// The highest manager tier the actor holds.
    pub fn highest_tier(&self) -> Option<ManagerTier> {
        if self.holds(ManagerTier::Full) {
            Some(ManagerTier::Full)
        } else if self.holds(ManagerTier::Limited) {
            Some(ManagerTier::Limited)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::serenity::create_test_role;

    #[test]
    fn resolves_role_names_from_guild_roles() {
        let full = create_test_role(1001, "BotManager", 0, 5);
        let member = create_test_role(1002, "Member", 0, 1);
        let guild_roles = HashMap::from([(full.id, full), (member.id, member)]);

        let context = AuthorizationContext::from_member_roles(
            7,
            &[RoleId::new(1001), RoleId::new(1002), RoleId::new(9999)],
            &guild_roles,
            Permissions::empty(),
        );

        assert_eq!(context.role_names, vec!["BotManager", "Member"]);
        assert_eq!(context.highest_tier(), Some(ManagerTier::Full));
    }

    #[test]
    fn full_tier_outranks_limited() {
        let context = AuthorizationContext::new(
            7,
            vec!["BotManager 2".to_string(), "BotManager".to_string()],
            Permissions::empty(),
        );
        assert_eq!(context.highest_tier(), Some(ManagerTier::Full));
    }

    #[test]
    fn administrator_implies_every_permission() {
        let context = AuthorizationContext::new(7, vec![], Permissions::ADMINISTRATOR);
        assert!(context.has_native(Permissions::BAN_MEMBERS | Permissions::MANAGE_ROLES));
    }

    #[test]
    fn tier_names_and_numbers() {
        assert_eq!(ManagerTier::from_role_name("BotManager"), Some(ManagerTier::Full));
        assert_eq!(ManagerTier::from_role_name("BotManager 2"), Some(ManagerTier::Limited));
        assert_eq!(ManagerTier::from_role_name("botmanager"), None);
        assert_eq!(ManagerTier::from_number(2), Some(ManagerTier::Limited));
        assert_eq!(ManagerTier::from_number(3), None);
        assert!(ManagerTier::Full.role_permissions().ban_members());
        assert!(!ManagerTier::Limited.role_permissions().kick_members());
    }
}
