//! Application state shared across handlers

use auth::{AuthService, rate_limiter::RateLimiter};
use common::OrderService;
use sqlx::PgPool;

use crate::{config::ServerConfig, uploads::UploadStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub auth: AuthService,
    pub uploads: UploadStore,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(pool: PgPool, config: &ServerConfig) -> Self {
        Self {
            orders: OrderService::new(pool.clone()),
            auth: AuthService::new(pool, RateLimiter::default()),
            uploads: UploadStore::new(&config.upload_dir, &config.upload_url_prefix),
            secure_cookies: config.secure_cookies,
        }
    }
}
