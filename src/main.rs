mod bot;
mod config;
mod data;
mod error;
mod middleware;
mod model;
mod service;
mod startup;
mod state;
mod util;

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::AppError, service::game::GameRegistry, state::BotState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let state = BotState::new(db, GameRegistry::new());

    tracing::info!("Starting bot");

    bot::start::start_bot(&config, state).await
}
