use super::*;

/// Tests the full tier requirement denies a limited manager.
///
/// Expected: Err(AuthError::RequiresFullManagerTier)
#[test]
fn full_requirement_denies_limited_tier() {
    let ctx = context(&["BotManager 2"], Permissions::empty());

    assert_eq!(authorize(&ctx, true), Err(AuthError::RequiresFullManagerTier));
}

/// Tests the full tier requirement allows a full manager.
///
/// Expected: Ok(ManagerTier::Full)
#[test]
fn full_requirement_allows_full_tier() {
    let ctx = context(&["BotManager"], Permissions::empty());

    assert_eq!(authorize(&ctx, true), Ok(ManagerTier::Full));
}

/// Tests the any-tier requirement allows either manager role.
///
/// Expected: Ok for both tiers
#[test]
fn any_requirement_allows_either_tier() {
    let full = context(&["BotManager"], Permissions::empty());
    let limited = context(&["Member", "BotManager 2"], Permissions::empty());

    assert_eq!(authorize(&full, false), Ok(ManagerTier::Full));
    assert_eq!(authorize(&limited, false), Ok(ManagerTier::Limited));
}

/// Tests actors without a manager role are denied regardless of requirement.
///
/// Expected: Err(AuthError::NotAManager)
#[test]
fn denies_non_managers() {
    let ctx = context(&["Member", "Moderator"], Permissions::ADMINISTRATOR);

    assert_eq!(authorize(&ctx, false), Err(AuthError::NotAManager));
    assert_eq!(authorize(&ctx, true), Err(AuthError::NotAManager));
}
