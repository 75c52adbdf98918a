//! Restaurant admin routes
//!
//! All routes carry the restaurant id in the path; the guard compares it
//! with the admin's own restaurant.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use serde::Serialize;
use shared::models::{
    BookingDetail, DiningTable, DiningTableCreate, MenuAvailabilityUpdate, MenuItem,
    MenuItemCreate, Order, OrderDetail, OrderStatusUpdate, TableStatusUpdate,
};

use super::ApiResult;
use crate::auth::SessionClaims;
use crate::services::{booking, order, restaurant};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/restaurants/{rid}/bookings", get(list_bookings))
        .route("/api/admin/restaurants/{rid}/tables", post(create_table))
        .route(
            "/api/admin/restaurants/{rid}/tables/{tid}/status",
            put(update_table_status),
        )
        .route("/api/admin/restaurants/{rid}/menu", post(create_menu_item))
        .route(
            "/api/admin/restaurants/{rid}/menu/{mid}/availability",
            put(update_menu_availability),
        )
        .route("/api/admin/restaurants/{rid}/orders", get(list_orders))
        .route(
            "/api/admin/restaurants/{rid}/orders/{oid}/status",
            put(update_order_status),
        )
}

#[derive(Serialize)]
pub struct MenuAvailability {
    pub id: i64,
    pub is_available: bool,
}

/// GET /api/admin/restaurants/{rid}/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(rid): Path<i64>,
) -> ApiResult<Vec<BookingDetail>> {
    Ok(Json(
        booking::list_restaurant_bookings(&state, &claims, rid).await?,
    ))
}

/// POST /api/admin/restaurants/{rid}/tables
pub async fn create_table(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(rid): Path<i64>,
    Json(req): Json<DiningTableCreate>,
) -> ApiResult<DiningTable> {
    Ok(Json(restaurant::add_table(&state, &claims, rid, &req).await?))
}

/// PUT /api/admin/restaurants/{rid}/tables/{tid}/status
pub async fn update_table_status(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path((rid, tid)): Path<(i64, i64)>,
    Json(req): Json<TableStatusUpdate>,
) -> ApiResult<DiningTable> {
    Ok(Json(
        booking::update_table_status(&state, &claims, rid, tid, req.status).await?,
    ))
}

/// POST /api/admin/restaurants/{rid}/menu
pub async fn create_menu_item(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(rid): Path<i64>,
    Json(req): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    Ok(Json(
        restaurant::add_menu_item(&state, &claims, rid, &req).await?,
    ))
}

/// PUT /api/admin/restaurants/{rid}/menu/{mid}/availability
pub async fn update_menu_availability(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path((rid, mid)): Path<(i64, i64)>,
    Json(req): Json<MenuAvailabilityUpdate>,
) -> ApiResult<MenuAvailability> {
    restaurant::set_menu_item_available(&state, &claims, rid, mid, req.is_available).await?;
    Ok(Json(MenuAvailability {
        id: mid,
        is_available: req.is_available,
    }))
}

/// GET /api/admin/restaurants/{rid}/orders
pub async fn list_orders(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path(rid): Path<i64>,
) -> ApiResult<Vec<OrderDetail>> {
    Ok(Json(order::list_restaurant_orders(&state, &claims, rid).await?))
}

/// PUT /api/admin/restaurants/{rid}/orders/{oid}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    claims: SessionClaims,
    Path((rid, oid)): Path<(i64, i64)>,
    Json(req): Json<OrderStatusUpdate>,
) -> ApiResult<Order> {
    Ok(Json(
        order::update_order_status(&state, &claims, rid, oid, req.status).await?,
    ))
}
