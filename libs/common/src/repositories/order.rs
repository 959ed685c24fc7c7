//! Order repository for database operations

use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};

use crate::error::DatabaseResult;
use crate::models::{Customer, Order, OrderFilter, order::DEFAULT_STATUS};

const ORDER_COLUMNS: &str =
    "id, user_id, items, total, status, created_at, full_name, address, phone";

/// Order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a pending order with a precomputed total
    pub async fn insert(
        &self,
        user_id: Option<i64>,
        items: &[i64],
        total: Decimal,
        customer: Option<&Customer>,
    ) -> DatabaseResult<Order> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO orders (user_id, items, total, status, full_name, address, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(Json(items))
        .bind(total)
        .bind(DEFAULT_STATUS)
        .bind(customer.map(Customer::full_name))
        .bind(customer.map(Customer::address))
        .bind(customer.map(Customer::phone))
        .fetch_one(&self.pool)
        .await?;

        Ok(order_from_row(&row)?)
    }

    /// List orders newest first
    pub async fn list(&self, filter: OrderFilter) -> DatabaseResult<Vec<Order>> {
        let rows = match filter {
            OrderFilter::All => {
                sqlx::query(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
            OrderFilter::ByUser(user_id) => {
                sqlx::query(&format!(
                    r#"
                    SELECT {ORDER_COLUMNS} FROM orders
                    WHERE user_id = $1
                    ORDER BY created_at DESC, id DESC
                    "#
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let orders = rows
            .iter()
            .map(order_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(orders)
    }

    /// Overwrite an order's status, returning the updated order if it exists
    pub async fn update_status(&self, id: i64, status: &str) -> DatabaseResult<Option<Order>> {
        let row = sqlx::query(&format!(
            "UPDATE orders SET status = $1 WHERE id = $2 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(order_from_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete an order, returning whether a row was removed
    pub async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn order_from_row(row: &PgRow) -> Result<Order, sqlx::Error> {
    let Json(items): Json<Vec<i64>> = row.try_get("items")?;

    Ok(Order {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        items,
        total: row.try_get("total")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
        full_name: row.try_get("full_name")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
    })
}
