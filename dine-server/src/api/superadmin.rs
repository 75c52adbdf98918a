//! Platform owner routes

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{post, put},
};
use shared::models::{Restaurant, RestaurantCreate, RestaurantCreated, RestaurantStatusUpdate};

use super::ApiResult;
use crate::auth::SessionClaims;
use crate::services::restaurant;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/superadmin/restaurants", post(create_restaurant))
        .route(
            "/api/superadmin/restaurants/{id}/status",
            put(update_restaurant_status),
        )
}

/// POST /api/superadmin/restaurants
pub async fn create_restaurant(
    State(state): State<AppState>,
    claims: SessionClaims,
    Json(req): Json<RestaurantCreate>,
) -> ApiResult<RestaurantCreated> {
    Ok(Json(
        restaurant::create_restaurant(&state, &claims, &req).await?,
    ))
}

/// PUT /api/superadmin/restaurants/{id}/status
pub async fn update_restaurant_status(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(id): Path<i64>,
    Json(req): Json<RestaurantStatusUpdate>,
) -> ApiResult<Restaurant> {
    Ok(Json(
        restaurant::set_restaurant_active(&state, &claims, id, req.is_active).await?,
    ))
}
