use super::*;

/// Tests policies expand into native, tier, then hierarchy checks.
///
/// Expected: checks in that fixed order
#[test]
fn expands_checks_in_order() {
    let policy = CommandPolicy::any(Permissions::MANAGE_ROLES).managing_roles();

    assert_eq!(
        policy.checks(Some((2, 5))),
        vec![
            Permission::Native(Permissions::MANAGE_ROLES),
            Permission::Manager(TierRequirement::Any),
            Permission::RoleBelowBot { target: 2, bot_top: 5 },
        ]
    );
}

/// Tests native-only policies have no tier check.
///
/// Expected: a single native check
#[test]
fn native_only_policy_skips_tier() {
    let policy = CommandPolicy::native_only(Permissions::MANAGE_ROLES);

    assert_eq!(
        policy.checks(None),
        vec![Permission::Native(Permissions::MANAGE_ROLES)]
    );
}

/// Tests role-mutating policies fail closed when ranks are unknown.
///
/// Expected: Err(AuthError::RoleHierarchyViolation)
#[test]
fn missing_role_ranks_fail_closed() {
    let policy = CommandPolicy::full(Permissions::MANAGE_ROLES).managing_roles();
    let ctx = context(&["BotManager"], Permissions::ADMINISTRATOR);

    let result = AuthGuard::new(&ctx).require(&policy.checks(None));

    assert!(matches!(result, Err(AuthError::RoleHierarchyViolation { .. })));
}

/// Tests a limited manager is stopped by a full-tier policy.
///
/// Expected: Err(AuthError::RequiresFullManagerTier)
#[test]
fn full_policy_denies_limited_manager() {
    let policy = CommandPolicy::full(Permissions::KICK_MEMBERS);
    let ctx = context(&["BotManager 2"], Permissions::KICK_MEMBERS);

    let result = AuthGuard::new(&ctx).require(&policy.checks(None));

    assert_eq!(result, Err(AuthError::RequiresFullManagerTier));
}
