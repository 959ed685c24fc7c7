use anyhow::Result;
use common::{
    OrderService,
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
};
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod handler;
mod payload;

use crate::{config::BotConfig, handler::WebAppMenu};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Candy Store bot");

    let config = BotConfig::from_env()?;
    let menu = WebAppMenu::new(&config.webapp_base_url)?;

    // Initialize database connection
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    if !health_check(&pool).await? {
        anyhow::bail!("Failed to connect to database");
    }
    run_migrations(&pool).await?;

    let orders = OrderService::new(pool);
    let bot = Bot::new(config.token);

    info!("Bot started, polling for updates");
    Dispatcher::builder(bot, handler::schema())
        .dependencies(dptree::deps![orders, menu])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Shutting down bot");
    Ok(())
}
