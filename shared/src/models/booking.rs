//! Booking Model

use serde::{Deserialize, Serialize};

/// Booking status
///
/// Only `Confirmed` bookings are active; a confirmed booking holds its
/// table in `reserved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    /// Guests were seated
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub table_id: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub party_size: i64,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Booking joined with restaurant and table labels (list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub booking: Booking,
    pub restaurant_name: String,
    pub table_number: i64,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    pub restaurant_id: i64,
    pub table_id: i64,
    pub date: String,
    pub time: String,
    #[serde(alias = "guests")]
    pub party_size: i64,
    pub special_requests: Option<String>,
}

/// Booking creation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreated {
    pub booking_id: i64,
    pub restaurant_id: i64,
    pub table_id: i64,
    pub date: String,
    pub time: String,
    pub party_size: i64,
    pub status: BookingStatus,
}
