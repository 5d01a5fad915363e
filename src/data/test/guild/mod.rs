use crate::{data::guild::GuildRepository, error::AppError};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod find_by_guild_id;
mod get_or_create;
