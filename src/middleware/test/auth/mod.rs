use crate::{
    error::auth::AuthError,
    middleware::auth::{authorize, AuthGuard, CommandPolicy, Permission},
    model::auth::{AuthorizationContext, ManagerTier, TierRequirement},
};
use serenity::all::Permissions;

mod authorize;
mod policy;
mod require;

const ACTOR: u64 = 123456789;

fn context(roles: &[&str], permissions: Permissions) -> AuthorizationContext {
    AuthorizationContext::new(
        ACTOR,
        roles.iter().map(|r| r.to_string()).collect(),
        permissions,
    )
}
