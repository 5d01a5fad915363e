use sea_orm::DatabaseConnection;

use crate::{
    data::{guild::GuildRepository, warning::WarningRepository},
    error::AppError,
    model::warning::{CreateWarningParam, IssuedWarning, Warning},
};

/// Number of warnings listed by the `warnings` command.
pub const RECENT_WARNINGS_LIMIT: u64 = 10;

pub struct WarningService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WarningService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a warning and returns it with the target's new total in the guild.
    ///
    /// The guild row is created on demand.
    pub async fn issue(&self, param: CreateWarningParam) -> Result<IssuedWarning, AppError> {
        GuildRepository::new(self.db)
            .get_or_create(param.guild_id)
            .await?;

        let repo = WarningRepository::new(self.db);
        let warning = repo.create(param).await?;
        let total = repo
            .count_by_user(warning.guild_id, warning.user_id)
            .await?;

        Ok(IssuedWarning { warning, total })
    }

    /// Gets a user's total warning count and most recent warnings in a guild.
    pub async fn history(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<(u64, Vec<Warning>), AppError> {
        let repo = WarningRepository::new(self.db);

        let total = repo.count_by_user(guild_id, user_id).await?;
        let recent = repo
            .get_recent_by_user(guild_id, user_id, RECENT_WARNINGS_LIMIT)
            .await?;

        Ok((total, recent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::builder::TestBuilder;

    fn param(user_id: u64, reason: Option<&str>) -> CreateWarningParam {
        CreateWarningParam {
            guild_id: 900,
            user_id,
            moderator_id: 1,
            reason: reason.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn issue_creates_guild_and_counts() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = WarningService::new(db);

        let first = service.issue(param(42, Some("spam"))).await?;
        let second = service.issue(param(42, None)).await?;
        let other = service.issue(param(43, None)).await?;

        assert_eq!(first.total, 1);
        assert_eq!(second.total, 2);
        assert_eq!(other.total, 1);
        assert!(GuildRepository::new(db).find_by_guild_id(900).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn history_lists_recent_warnings() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_moderation_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = WarningService::new(db);

        for _ in 0..12 {
            service.issue(param(42, None)).await?;
        }

        let (total, recent) = service.history(900, 42).await?;

        assert_eq!(total, 12);
        assert_eq!(recent.len(), RECENT_WARNINGS_LIMIT as usize);

        Ok(())
    }
}
