//! Public restaurant browsing (active restaurants only)

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{DiningTable, MenuItem, Restaurant};

use super::ApiResult;
use crate::db::{menu, restaurants, tables};
use crate::error::ServiceError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/restaurants", get(list))
        .route("/api/restaurants/{id}", get(get_by_id))
        .route("/api/restaurants/{id}/tables", get(list_tables))
        .route("/api/restaurants/{id}/menu", get(list_menu))
}

async fn require_active(state: &AppState, id: i64) -> Result<Restaurant, AppError> {
    restaurants::find_active(&state.pool, id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))
}

/// GET /api/restaurants
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Restaurant>> {
    let list = restaurants::list_active(&state.pool)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(list))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Restaurant> {
    Ok(Json(require_active(&state, id).await?))
}

/// GET /api/restaurants/{id}/tables
pub async fn list_tables(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<DiningTable>> {
    require_active(&state, id).await?;
    let list = tables::list_for_restaurant(&state.pool, id)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(list))
}

/// GET /api/restaurants/{id}/menu
pub async fn list_menu(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<MenuItem>> {
    require_active(&state, id).await?;
    let list = menu::list_for_restaurant(&state.pool, id)
        .await
        .map_err(ServiceError::from)?;
    Ok(Json(list))
}
