//! Customer booking routes

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use shared::models::{BookingCreate, BookingCreated, BookingDetail};

use super::ApiResult;
use crate::auth::SessionClaims;
use crate::services::booking;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", get(list).post(create))
        .route("/api/bookings/{id}", get(get_by_id))
        .route("/api/bookings/{id}/cancel", put(cancel))
}

/// POST /api/bookings
pub async fn create(
    State(state): State<AppState>,
    claims: SessionClaims,
    Json(req): Json<BookingCreate>,
) -> ApiResult<BookingCreated> {
    Ok(Json(booking::create_booking(&state, &claims, &req).await?))
}

/// GET /api/bookings
pub async fn list(
    State(state): State<AppState>,
    claims: SessionClaims,
) -> ApiResult<Vec<BookingDetail>> {
    Ok(Json(booking::list_own_bookings(&state, &claims).await?))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(id): Path<i64>,
) -> ApiResult<BookingDetail> {
    Ok(Json(booking::get_own_booking(&state, &claims, id).await?))
}

/// PUT /api/bookings/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(id): Path<i64>,
) -> ApiResult<BookingDetail> {
    Ok(Json(booking::cancel_booking(&state, &claims, id).await?))
}
