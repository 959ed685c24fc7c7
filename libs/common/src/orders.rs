//! Order service
//!
//! Checkout resolution, total computation and the admin order operations,
//! shared by the HTTP API and the chat bot.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::error::{OrderError, OrderResult};
use crate::models::{NewOrder, NewProduct, Order, OrderFilter, Product};
use crate::repositories::{OrderRepository, ProductRepository};

/// An order together with the products its total was computed from
#[derive(Debug, Clone)]
pub struct CreatedOrder {
    pub order: Order,
    pub products: Vec<Product>,
}

/// Sum of the prices of the given products
pub fn order_total(products: &[Product]) -> Decimal {
    products.iter().map(|p| p.price).sum()
}

/// Order service
#[derive(Clone)]
pub struct OrderService {
    products: ProductRepository,
    orders: OrderRepository,
}

impl OrderService {
    /// Create a new order service over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }

    /// Price and persist an order
    ///
    /// Each requested id is resolved against the whole catalog, inactive
    /// products included. A product requested several times is billed once,
    /// while `items` keeps the request exactly as sent.
    pub async fn create_order(&self, new_order: NewOrder) -> OrderResult<CreatedOrder> {
        if new_order.items.is_empty() {
            return Err(OrderError::Validation("Invalid items".to_string()));
        }

        let products = self.products.find_by_ids(&new_order.items).await?;
        if products.is_empty() {
            return Err(OrderError::NotFound("Products not found".to_string()));
        }

        let total = order_total(&products);
        let order = self
            .orders
            .insert(
                new_order.user_id,
                &new_order.items,
                total,
                new_order.customer.as_ref(),
            )
            .await?;

        info!(order_id = order.id, %total, "Order created");
        Ok(CreatedOrder { order, products })
    }

    /// Overwrite the status of an existing order
    pub async fn update_status(&self, order_id: i64, status: &str) -> OrderResult<Order> {
        let order = self
            .orders
            .update_status(order_id, status)
            .await?
            .ok_or_else(order_not_found)?;

        info!(order_id, status, "Order status updated");
        Ok(order)
    }

    /// Permanently remove an order
    pub async fn delete_order(&self, order_id: i64) -> OrderResult<()> {
        if !self.orders.delete(order_id).await? {
            return Err(order_not_found());
        }

        info!(order_id, "Order deleted");
        Ok(())
    }

    /// Orders newest first
    pub async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Vec<Order>> {
        Ok(self.orders.list(filter).await?)
    }

    /// Products currently offered in the catalog
    pub async fn list_active_products(&self) -> OrderResult<Vec<Product>> {
        Ok(self.products.list_active().await?)
    }

    /// Add a product to the catalog
    pub async fn create_product(&self, new_product: NewProduct) -> OrderResult<Product> {
        if new_product.name.trim().is_empty() {
            return Err(OrderError::Validation("Product name is required".to_string()));
        }
        if new_product.price < Decimal::ZERO {
            return Err(OrderError::Validation(
                "Price must not be negative".to_string(),
            ));
        }

        Ok(self.products.create(&new_product).await?)
    }
}

fn order_not_found() -> OrderError {
    OrderError::NotFound("Order not found".to_string())
}
