//! Common library for the candy store
//!
//! This crate provides the persistence layer shared by the HTTP API and the
//! chat bot: database connectivity and migrations, the catalog and order
//! models with their repositories, and the order service.
//!
//! # Example
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, run_migrations};
//! use common::models::OrderFilter;
//! use common::OrderService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let orders = OrderService::new(pool).list_orders(OrderFilter::All).await?;
//!     println!("{} orders", orders.len());
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod models;
pub mod orders;
pub mod repositories;

pub use error::{DatabaseError, DatabaseResult, OrderError, OrderResult};
pub use orders::{CreatedOrder, OrderService};
