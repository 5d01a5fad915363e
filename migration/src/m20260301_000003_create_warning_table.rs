use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_guild_table::Guild;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Warning::Table)
                    .if_not_exists()
                    .col(pk_auto(Warning::Id))
                    .col(string(Warning::GuildId))
                    .col(string(Warning::UserId))
                    .col(string(Warning::ModeratorId))
                    .col(text_null(Warning::Reason))
                    .col(timestamp(Warning::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_warning_guild_id")
                            .from(Warning::Table, Warning::GuildId)
                            .to(Guild::Table, Guild::GuildId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Warning counts are always looked up per guild and target.
        manager
            .create_index(
                Index::create()
                    .name("idx_warning_guild_user")
                    .table(Warning::Table)
                    .col(Warning::GuildId)
                    .col(Warning::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Warning::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Warning {
    Table,
    Id,
    GuildId,
    UserId,
    ModeratorId,
    Reason,
    CreatedAt,
}
