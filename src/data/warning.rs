//! Warning data repository.
//!
//! Warnings are append-only: the bot records and counts them but never edits or
//! removes them.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    error::AppError,
    model::warning::{CreateWarningParam, Warning},
};

pub struct WarningRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WarningRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new warning. The guild row must already exist.
    ///
    /// # Arguments
    /// - `param` - Guild, target, moderator and optional reason
    ///
    /// # Returns
    /// - `Ok(Warning)` - The stored warning
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateWarningParam) -> Result<Warning, AppError> {
        let entity = entity::warning::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            moderator_id: ActiveValue::Set(param.moderator_id.to_string()),
            reason: ActiveValue::Set(param.reason),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Warning::from_entity(entity)
    }

    /// Counts the warnings a user has received in a guild.
    pub async fn count_by_user(&self, guild_id: u64, user_id: u64) -> Result<u64, AppError> {
        let count = entity::prelude::Warning::find()
            .filter(entity::warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::warning::Column::UserId.eq(user_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Gets a user's most recent warnings in a guild, newest first.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord ID of the warned user
    /// - `limit` - Maximum number of warnings to return
    ///
    /// # Returns
    /// - `Ok(Vec<Warning>)` - Up to `limit` warnings ordered by creation time descending
    /// - `Err(AppError)` - Database error or corrupted ID
    pub async fn get_recent_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
        limit: u64,
    ) -> Result<Vec<Warning>, AppError> {
        entity::prelude::Warning::find()
            .filter(entity::warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::warning::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::warning::Column::CreatedAt)
            .order_by_desc(entity::warning::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Warning::from_entity)
            .collect()
    }
}
