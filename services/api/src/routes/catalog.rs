//! Product catalog and admin uploads

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use common::models::{NewProduct, Product};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Active products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.orders.list_active_products().await?))
}

/// Create a product from a multipart form with `name`, `description`,
/// `price` and an image `file`
pub async fn upload_product(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let mut multipart = multipart?;

    let mut name = None;
    let mut description = String::new();
    let mut price = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("description") => description = field.text().await?,
            Some("price") => price = Some(parse_price(&field.text().await?)?),
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                file = Some((file_name, field.bytes().await?));
            }
            _ => {}
        }
    }

    let name = required_name(name)?;
    let price = price.ok_or_else(|| missing_field("price"))?;
    let (file_name, bytes) = file.ok_or_else(|| missing_field("file"))?;

    let image = state.uploads.save(&file_name, &bytes).await.map_err(|e| {
        error!("Failed to store upload: {}", e);
        ApiError::InternalServerError
    })?;

    let created = state
        .orders
        .create_product(NewProduct {
            name,
            description,
            price,
            image: Some(image.clone()),
        })
        .await;
    let product = match created {
        Ok(product) => product,
        Err(e) => {
            if let Err(io_err) = state.uploads.discard(&image).await {
                error!("Failed to remove orphaned upload {}: {}", image, io_err);
            }
            return Err(e.into());
        }
    };

    Ok(Json(json!({
        "status": "ok",
        "id": product.id,
    })))
}

/// Product name, checked before anything is written to disk
fn required_name(name: Option<String>) -> ApiResult<String> {
    name.filter(|n| !n.trim().is_empty())
        .ok_or_else(|| missing_field("name"))
}

fn missing_field(field: &str) -> ApiError {
    ApiError::Validation(format!("Missing field: {}", field))
}

fn parse_price(raw: &str) -> ApiResult<Decimal> {
    let price: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::Validation("Invalid price".to_string()))?;

    if price < Decimal::ZERO {
        return Err(ApiError::Validation("Invalid price".to_string()));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("25.0").unwrap(), Decimal::new(250, 1));
        assert_eq!(parse_price(" 3 ").unwrap(), Decimal::new(3, 0));
        assert_eq!(parse_price("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_blank_name_is_rejected_before_saving() {
        assert_eq!(required_name(Some("Lollipop".into())).unwrap(), "Lollipop");
        for name in [None, Some(String::new()), Some("   ".into())] {
            assert!(matches!(required_name(name), Err(ApiError::Validation(_))));
        }
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        for raw in ["", "free", "-1", "1,50"] {
            assert!(matches!(parse_price(raw), Err(ApiError::Validation(_))), "{}", raw);
        }
    }
}
