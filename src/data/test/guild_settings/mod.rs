use crate::{data::guild_settings::GuildSettingsRepository, error::AppError};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod find_by_guild_id;
mod set_application_channel;
