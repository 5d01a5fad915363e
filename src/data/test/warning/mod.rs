use crate::{
    data::warning::WarningRepository, error::AppError, model::warning::CreateWarningParam,
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod count_by_user;
mod create;
mod get_recent_by_user;
