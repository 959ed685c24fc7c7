//! Checkout and order administration

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use axum_extra::extract::cookie::CookieJar;
use common::models::{Order, OrderFilter, order::CheckoutRequest};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::ApiResult,
    middleware::{CurrentUser, session_user},
    state::AppState,
};

/// Query of `POST /api/admin/orders/update_status`
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub order_id: i64,
    pub status: String,
}

/// Place an order from the web app
///
/// Without an explicit `user_id`, the order is attributed to the telegram id
/// of the logged-in user, if any.
pub async fn create_order(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(payload) = payload?;
    let mut new_order = payload.validate()?;

    if new_order.user_id.is_none() {
        if let Some(user) = session_user(&state, &jar).await? {
            new_order.user_id = user.telegram_id;
        }
    }

    let created = state.orders.create_order(new_order).await?;

    Ok(Json(json!({
        "status": "ok",
        "id": created.order.id,
    })))
}

/// Orders placed under the caller's telegram id
pub async fn my_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Order>>> {
    let Some(telegram_id) = user.telegram_id else {
        return Ok(Json(Vec::new()));
    };

    Ok(Json(
        state
            .orders
            .list_orders(OrderFilter::ByUser(telegram_id))
            .await?,
    ))
}

pub async fn list_all_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list_orders(OrderFilter::All).await?))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    query: Result<Query<StatusUpdate>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(update) = query?;
    let order = state
        .orders
        .update_status(update.order_id, &update.status)
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "order_id": order.id,
        "new_status": order.status,
    })))
}

pub async fn delete_order(
    State(state): State<AppState>,
    order_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(order_id) = order_id?;
    state.orders.delete_order(order_id).await?;

    Ok(Json(json!({
        "status": "ok",
        "deleted": order_id,
    })))
}
