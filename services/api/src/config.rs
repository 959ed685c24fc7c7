//! HTTP server configuration loaded from `API_*` environment variables

use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the listener binds to
    pub bind_address: String,
    /// Directory uploaded product images are written to
    pub upload_dir: PathBuf,
    /// Public URL prefix under which `upload_dir` is served
    pub upload_url_prefix: String,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_address", "0.0.0.0:3001")?
            .set_default("upload_dir", "static/uploads")?
            .set_default("upload_url_prefix", "/static/uploads")?
            .set_default("secure_cookies", false)?
            .add_source(Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
