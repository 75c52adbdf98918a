//! HTTP API for dine-server
//!
//! Handlers only extract, call into `services` and serialize; every
//! authorization decision is made by the guard inside the service call.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod health;
pub mod orders;
pub mod restaurants;
pub mod superadmin;

use axum::Json;
use axum::Router;
use axum::routing::get;
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Build the full application router with middleware and state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(auth::router(&state))
        .merge(restaurants::router())
        .merge(bookings::router())
        .merge(orders::router())
        .merge(admin::router())
        .merge(superadmin::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
