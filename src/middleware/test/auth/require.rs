use super::*;

/// Tests an actor satisfying every check passes.
///
/// Expected: Ok(Some(ManagerTier::Full))
#[test]
fn grants_access_when_all_checks_pass() {
    let ctx = context(&["BotManager"], Permissions::KICK_MEMBERS);
    let guard = AuthGuard::new(&ctx);

    let result = guard.require(&[
        Permission::Native(Permissions::KICK_MEMBERS),
        Permission::Manager(TierRequirement::Full),
    ]);

    assert_eq!(result, Ok(Some(ManagerTier::Full)));
}

/// Tests the native check runs before the tier check.
///
/// When both checks would fail, the native denial is reported.
///
/// Expected: Err(AuthError::InsufficientNativePermission)
#[test]
fn native_check_runs_first() {
    let ctx = context(&[], Permissions::empty());
    let guard = AuthGuard::new(&ctx);

    let result = guard.require(&[
        Permission::Native(Permissions::BAN_MEMBERS),
        Permission::Manager(TierRequirement::Full),
    ]);

    assert_eq!(
        result,
        Err(AuthError::InsufficientNativePermission(Permissions::BAN_MEMBERS))
    );
}

/// Tests a manager without the native bit is still denied.
///
/// Expected: Err(AuthError::InsufficientNativePermission) listing only missing bits
#[test]
fn manager_role_does_not_replace_native_permission() {
    let ctx = context(&["BotManager"], Permissions::MANAGE_CHANNELS);
    let guard = AuthGuard::new(&ctx);

    let result = guard.require(&[
        Permission::Native(Permissions::MANAGE_CHANNELS | Permissions::MANAGE_ROLES),
        Permission::Manager(TierRequirement::Any),
    ]);

    assert_eq!(
        result,
        Err(AuthError::InsufficientNativePermission(Permissions::MANAGE_ROLES))
    );
}

/// Tests the native bit alone does not satisfy a tier requirement.
///
/// Expected: Err(AuthError::NotAManager)
#[test]
fn native_permission_does_not_replace_manager_role() {
    let ctx = context(&[], Permissions::MODERATE_MEMBERS);
    let guard = AuthGuard::new(&ctx);

    let result = guard.require(&[
        Permission::Native(Permissions::MODERATE_MEMBERS),
        Permission::Manager(TierRequirement::Any),
    ]);

    assert_eq!(result, Err(AuthError::NotAManager));
}

/// Tests a role ranked below the bot passes the hierarchy check.
///
/// Expected: Ok
#[test]
fn allows_role_below_bot() {
    let ctx = context(&["BotManager 2"], Permissions::MANAGE_ROLES);
    let guard = AuthGuard::new(&ctx);

    let result = guard.require(&[Permission::RoleBelowBot { target: 3, bot_top: 4 }]);

    assert_eq!(result, Ok(None));
}

/// Tests roles at or above the bot's top role are refused.
///
/// Expected: Err(AuthError::RoleHierarchyViolation)
#[test]
fn denies_role_at_or_above_bot() {
    let ctx = context(&["BotManager"], Permissions::MANAGE_ROLES);
    let guard = AuthGuard::new(&ctx);

    assert_eq!(
        guard.require(&[Permission::RoleBelowBot { target: 4, bot_top: 4 }]),
        Err(AuthError::RoleHierarchyViolation { target: 4, bot_top: 4 })
    );
    assert_eq!(
        guard.require(&[Permission::RoleBelowBot { target: 9, bot_top: 4 }]),
        Err(AuthError::RoleHierarchyViolation { target: 9, bot_top: 4 })
    );
}

/// Tests an empty permission list grants access.
///
/// Expected: Ok(None)
#[test]
fn empty_permission_list_grants_access() {
    let ctx = context(&[], Permissions::empty());

    assert_eq!(AuthGuard::new(&ctx).require(&[]), Ok(None));
}
