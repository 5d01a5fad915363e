//! Authorization gate for privileged commands.
//!
//! A privileged command is described by a `CommandPolicy`. The policy expands into an
//! ordered list of `Permission` predicates: the native Discord permission bits first,
//! then the manager tier, then (for commands that grant or revoke roles) the role
//! hierarchy. `AuthGuard::require` evaluates the list in order and the first denial
//! short-circuits.

use serenity::all::Permissions;

use crate::{
    error::auth::AuthError,
    model::auth::{AuthorizationContext, ManagerTier, TierRequirement},
};

/// A single predicate evaluated by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// The actor's computed permissions must contain these bits.
    Native(Permissions),
    /// The actor must hold a manager tier satisfying the requirement.
    Manager(TierRequirement),
    /// The target role must sit strictly below the bot's highest role.
    RoleBelowBot { target: u16, bot_top: u16 },
}

/// Authorization requirements attached to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPolicy {
    /// Discord permission bits required of the actor.
    pub native: Permissions,
    /// Manager tier required of the actor, `None` for native-only commands.
    pub tier: Option<TierRequirement>,
    /// Whether the command grants or revokes a role on a member.
    pub manages_roles: bool,
}

impl CommandPolicy {
    /// Requires `native` bits and the full manager tier.
    pub const fn full(native: Permissions) -> Self {
        Self {
            native,
            tier: Some(TierRequirement::Full),
            manages_roles: false,
        }
    }

    /// Requires `native` bits and either manager tier.
    pub const fn any(native: Permissions) -> Self {
        Self {
            native,
            tier: Some(TierRequirement::Any),
            manages_roles: false,
        }
    }

    /// Requires only `native` bits.
    pub const fn native_only(native: Permissions) -> Self {
        Self {
            native,
            tier: None,
            manages_roles: false,
        }
    }

    /// Marks the command as mutating role assignments.
    pub const fn managing_roles(self) -> Self {
        Self {
            manages_roles: true,
            ..self
        }
    }

    /// Ordered predicates for this policy.
    ///
    /// # Arguments
    /// - `role_ranks` - `(target position, bot top position)` for role-mutating
    ///   commands; ignored otherwise
    pub fn checks(&self, role_ranks: Option<(u16, u16)>) -> Vec<Permission> {
        let mut checks = vec![Permission::Native(self.native)];

        if let Some(tier) = self.tier {
            checks.push(Permission::Manager(tier));
        }

        if self.manages_roles {
            // Without rank information the hierarchy check must fail closed.
            let (target, bot_top) = role_ranks.unwrap_or((u16::MAX, 0));
            checks.push(Permission::RoleBelowBot { target, bot_top });
        }

        checks
    }
}

/// Decides whether the actor's manager tier satisfies the requirement.
///
/// # Arguments
/// - `context` - The acting member's roles and permissions
/// - `require_full_tier` - `true` when only Tier 1 is acceptable
///
/// # Returns
/// - `Ok(ManagerTier)` - The tier that granted access
/// - `Err(AuthError::RequiresFullManagerTier)` - Actor holds only Tier 2 and Tier 1 is required
/// - `Err(AuthError::NotAManager)` - Actor holds neither tier
pub fn authorize(
    context: &AuthorizationContext,
    require_full_tier: bool,
) -> Result<ManagerTier, AuthError> {
    match (context.highest_tier(), require_full_tier) {
        (Some(ManagerTier::Full), _) => Ok(ManagerTier::Full),
        (Some(ManagerTier::Limited), false) => Ok(ManagerTier::Limited),
        (Some(ManagerTier::Limited), true) => Err(AuthError::RequiresFullManagerTier),
        (None, _) => Err(AuthError::NotAManager),
    }
}

pub struct AuthGuard<'a> {
    context: &'a AuthorizationContext,
}

impl<'a> AuthGuard<'a> {
    pub fn new(context: &'a AuthorizationContext) -> Self {
        Self { context }
    }

    /// Evaluates each permission in order, stopping at the first denial.
    ///
    /// # Returns
    /// - `Ok(Option<ManagerTier>)` - All checks passed; the tier that satisfied a
    ///   manager check, if one was required
    /// - `Err(AuthError)` - The first failed check
    pub fn require(&self, permissions: &[Permission]) -> Result<Option<ManagerTier>, AuthError> {
        let mut granted_tier = None;

        for permission in permissions {
            match *permission {
                Permission::Native(required) => {
                    if !self.context.has_native(required) {
                        return Err(AuthError::InsufficientNativePermission(
                            required - self.context.permissions,
                        ));
                    }
                }
                Permission::Manager(requirement) => {
                    let tier = authorize(self.context, requirement == TierRequirement::Full)?;
                    granted_tier = Some(tier);
                }
                Permission::RoleBelowBot { target, bot_top } => {
                    if target >= bot_top {
                        return Err(AuthError::RoleHierarchyViolation { target, bot_top });
                    }
                }
            }
        }

        Ok(granted_tier)
    }
}
