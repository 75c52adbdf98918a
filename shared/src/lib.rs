//! Shared types for the Dine platform
//!
//! Wire-level types used by both the server and its clients: error codes,
//! the error/response envelope, and the domain models for principals,
//! restaurants, dining tables, bookings and orders.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
