//! Repositories for catalog and order persistence

pub mod order;
pub mod product;

pub use order::OrderRepository;
pub use product::ProductRepository;
