//! Bot configuration loaded from `BOT_*` environment variables

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Bot configuration
#[derive(Clone, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// Public HTTPS origin serving the web app pages
    pub webapp_base_url: String,
}

impl BotConfig {
    /// Create a new BotConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("webapp_base_url", "https://yourdomain.com")?
            .add_source(Environment::with_prefix("BOT"))
            .build()?
            .try_deserialize()
    }
}
