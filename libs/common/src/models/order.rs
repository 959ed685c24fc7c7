//! Order model and checkout payload validation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OrderError, OrderResult};

/// Status assigned to every freshly created order
pub const DEFAULT_STATUS: &str = "pending";

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Chat-platform identifier of the customer, when known
    pub user_id: Option<i64>,
    /// Requested product ids, duplicates included
    pub items: Vec<i64>,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Delivery details collected by the web checkout form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    full_name: String,
    address: String,
    phone: String,
}

impl Customer {
    /// Build customer details, rejecting fields that are blank after trimming
    pub fn new(full_name: &str, address: &str, phone: &str) -> OrderResult<Self> {
        let full_name = full_name.trim();
        let address = address.trim();
        let phone = phone.trim();

        if full_name.is_empty() || address.is_empty() || phone.is_empty() {
            return Err(OrderError::Validation("Missing customer data".to_string()));
        }

        Ok(Self {
            full_name: full_name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Input of the order service
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub items: Vec<i64>,
    /// Absent for orders placed from the chat bot
    pub customer: Option<Customer>,
    pub user_id: Option<i64>,
}

/// Which orders to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilter {
    All,
    ByUser(i64),
}

/// Raw checkout body as posted by the web app
///
/// `items` is kept as a JSON value so that a malformed list is reported as a
/// validation failure rather than a generic body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Value,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<i64>,
}

impl CheckoutRequest {
    /// Validate the payload into an order request
    pub fn validate(self) -> OrderResult<NewOrder> {
        let items = parse_items(&self.items)?;
        let customer = Customer::new(
            self.full_name.as_deref().unwrap_or_default(),
            self.address.as_deref().unwrap_or_default(),
            self.phone.as_deref().unwrap_or_default(),
        )?;

        Ok(NewOrder {
            items,
            customer: Some(customer),
            user_id: self.user_id,
        })
    }
}

fn parse_items(value: &Value) -> OrderResult<Vec<i64>> {
    let invalid = || OrderError::Validation("Invalid items".to_string());

    let Value::Array(values) = value else {
        return Err(invalid());
    };
    if values.is_empty() {
        return Err(invalid());
    }

    values
        .iter()
        .map(|v| v.as_i64().ok_or_else(invalid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CheckoutRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_checkout_keeps_duplicates() {
        let order = request(json!({
            "items": [3, 1, 3],
            "full_name": "  Ada Lovelace ",
            "address": "12 Sugar Lane",
            "phone": "+1 555 0100",
            "user_id": 42
        }))
        .validate()
        .unwrap();

        assert_eq!(order.items, vec![3, 1, 3]);
        assert_eq!(order.user_id, Some(42));
        let customer = order.customer.unwrap();
        assert_eq!(customer.full_name(), "Ada Lovelace");
        assert_eq!(customer.address(), "12 Sugar Lane");
    }

    #[test]
    fn test_items_must_be_a_non_empty_integer_list() {
        let bodies = [
            json!({"full_name": "a", "address": "b", "phone": "c"}),
            json!({"items": [], "full_name": "a", "address": "b", "phone": "c"}),
            json!({"items": "1,2", "full_name": "a", "address": "b", "phone": "c"}),
            json!({"items": 7, "full_name": "a", "address": "b", "phone": "c"}),
            json!({"items": [1, "2"], "full_name": "a", "address": "b", "phone": "c"}),
            json!({"items": [1.5], "full_name": "a", "address": "b", "phone": "c"}),
            json!({"items": [null], "full_name": "a", "address": "b", "phone": "c"}),
        ];

        for body in bodies {
            let err = request(body.clone()).validate().unwrap_err();
            assert!(
                matches!(err, OrderError::Validation(ref msg) if msg == "Invalid items"),
                "expected invalid items for {body}"
            );
        }
    }

    #[test]
    fn test_blank_customer_fields_are_rejected() {
        let bodies = [
            json!({"items": [1], "address": "b", "phone": "c"}),
            json!({"items": [1], "full_name": "   ", "address": "b", "phone": "c"}),
            json!({"items": [1], "full_name": "a", "address": "\t", "phone": "c"}),
            json!({"items": [1], "full_name": "a", "address": "b", "phone": ""}),
        ];

        for body in bodies {
            let err = request(body.clone()).validate().unwrap_err();
            assert!(
                matches!(err, OrderError::Validation(ref msg) if msg == "Missing customer data"),
                "expected missing customer data for {body}"
            );
        }
    }

    #[test]
    fn test_items_are_checked_before_customer_fields() {
        let err = request(json!({"items": []})).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid items");
    }
}
