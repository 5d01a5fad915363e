use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::guild_settings::Entity")]
    GuildSettings,
    #[sea_orm(has_many = "super::warning::Entity")]
    Warning,
}

impl Related<super::guild_settings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuildSettings.def()
    }
}

impl Related<super::warning::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warning.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
