//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a guild together with `count` warnings against one user.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord ID of the warned user
/// - `count` - Number of warnings to create
///
/// # Returns
/// - `Ok((guild, warnings))` - Created guild and warnings in insertion order
/// - `Err(DbErr)` - Database error during creation
pub async fn create_guild_with_warnings(
    db: &DatabaseConnection,
    user_id: &str,
    count: usize,
) -> Result<(entity::guild::Model, Vec<entity::warning::Model>), DbErr> {
    let guild = crate::factory::guild::create_guild(db).await?;

    let mut warnings = Vec::with_capacity(count);
    for _ in 0..count {
        let warning = crate::factory::warning::WarningFactory::new(db, &guild.guild_id)
            .user_id(user_id)
            .build()
            .await?;
        warnings.push(warning);
    }

    Ok((guild, warnings))
}
