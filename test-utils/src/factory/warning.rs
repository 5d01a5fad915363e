//! Warning factory for creating test warning entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test warnings with customizable fields.
///
/// The referenced guild must already exist.
///
/// # Example
///
/// ```rust,ignore
/// let warning = WarningFactory::new(&db, &guild.guild_id)
///     .user_id("42")
///     .moderator_id("7")
///     .reason(Some("spam".to_string()))
///     .build()
///     .await?;
/// ```
pub struct WarningFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    moderator_id: String,
    reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'a> WarningFactory<'a> {
    /// Creates a new WarningFactory with default values.
    ///
    /// Defaults:
    /// - user_id and moderator_id: auto-incremented
    /// - reason: `None`
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        Self {
            db,
            guild_id: guild_id.to_string(),
            user_id: next_id().to_string(),
            moderator_id: next_id().to_string(),
            reason: None,
            created_at: Utc::now(),
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn moderator_id(mut self, moderator_id: impl Into<String>) -> Self {
        self.moderator_id = moderator_id.into();
        self
    }

    pub fn reason(mut self, reason: Option<String>) -> Self {
        self.reason = reason;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the warning entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::warning::Model)` - Created warning entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::warning::Model, DbErr> {
        entity::warning::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            moderator_id: ActiveValue::Set(self.moderator_id),
            reason: ActiveValue::Set(self.reason),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a warning with default values in the given guild.
pub async fn create_warning(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::warning::Model, DbErr> {
    WarningFactory::new(db, guild_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::helpers::create_guild_with_warnings};

    #[tokio::test]
    async fn creates_warnings_for_one_user() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let (guild, warnings) = create_guild_with_warnings(db, "42", 3).await?;

        assert_eq!(warnings.len(), 3);
        assert!(warnings
            .iter()
            .all(|w| w.user_id == "42" && w.guild_id == guild.guild_id));
        assert!(warnings.iter().all(|w| w.reason.is_none()));

        Ok(())
    }
}
