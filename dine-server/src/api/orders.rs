//! Customer order routes

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use shared::models::{OrderCreate, OrderCreated, OrderDetail};

use super::ApiResult;
use crate::auth::SessionClaims;
use crate::services::order;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list).post(create))
        .route("/api/orders/{id}", get(get_by_id))
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    claims: SessionClaims,
    Json(req): Json<OrderCreate>,
) -> ApiResult<OrderCreated> {
    Ok(Json(order::create_order(&state, &claims, &req).await?))
}

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    claims: SessionClaims,
) -> ApiResult<Vec<OrderDetail>> {
    Ok(Json(order::list_own_orders(&state, &claims).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(id): Path<i64>,
) -> ApiResult<OrderDetail> {
    Ok(Json(order::get_own_order(&state, &claims, id).await?))
}
