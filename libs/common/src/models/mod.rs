//! Catalog and order models

pub mod order;
pub mod product;

pub use order::{Customer, NewOrder, Order, OrderFilter};
pub use product::{NewProduct, Product};
