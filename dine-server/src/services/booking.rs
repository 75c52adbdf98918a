//! Booking service
//!
//! Creating a booking is one storage transaction: the ledger moves the
//! table `available -> reserved` and the booking row is inserted, or
//! neither happens. The transaction is bounded by the reservation deadline;
//! on timeout the future is dropped, and dropping an uncommitted
//! `sqlx::Transaction` rolls it back.

use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    BookingCreate, BookingCreated, BookingDetail, BookingStatus, DiningTable, TableStatus,
};
use sqlx::SqlitePool;

use crate::auth::guard::{self, Action};
use crate::auth::token::SessionClaims;
use crate::db::bookings::{self as booking_db, NewBooking};
use crate::db::tables::{self as ledger, LedgerError};
use crate::db::restaurants;
use crate::error::{ServiceError, ServiceResult};
use crate::state::AppState;

pub const MAX_PARTY_SIZE: i64 = 20;
pub const MAX_SPECIAL_REQUESTS_LEN: usize = 500;

impl From<LedgerError> for ServiceError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::NotFound => AppError::new(ErrorCode::TableNotFound).into(),
            LedgerError::CapacityExceeded {
                capacity,
                party_size,
            } => AppError::with_message(
                ErrorCode::PartySizeExceedsCapacity,
                format!("Table capacity is {capacity} guests"),
            )
            .with_detail("capacity", capacity)
            .with_detail("party_size", party_size)
            .into(),
            LedgerError::Unavailable { current } => AppError::new(ErrorCode::TableUnavailable)
                .with_detail("status", current.as_str())
                .into(),
            LedgerError::InvalidTransition { from, to } => AppError::with_message(
                ErrorCode::TableInvalidTransition,
                format!("Cannot change table status from {from} to {to}"),
            )
            .into(),
            LedgerError::Db(e) => e.into(),
        }
    }
}

/// `H:MM` or `HH:MM` on a 24-hour clock, normalised to `HH:MM`
pub fn normalize_time(time: &str) -> Option<String> {
    let (hour, minute) = time.split_once(':')?;
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let t = NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)?;
    Some(t.format("%H:%M").to_string())
}

/// Request shape checks
pub fn validate(req: &BookingCreate) -> Result<(), AppError> {
    if req.restaurant_id < 1 {
        return Err(AppError::validation("Valid restaurant ID is required")
            .with_detail("field", "restaurant_id"));
    }
    if req.table_id < 1 {
        return Err(
            AppError::validation("Valid table ID is required").with_detail("field", "table_id")
        );
    }
    if req.date.len() != 10 || NaiveDate::parse_from_str(&req.date, "%Y-%m-%d").is_err() {
        return Err(AppError::validation("Valid date is required")
            .with_detail("field", "date")
            .with_detail("expected", "YYYY-MM-DD"));
    }
    if normalize_time(&req.time).is_none() {
        return Err(AppError::validation("Valid time is required (HH:MM)")
            .with_detail("field", "time")
            .with_detail("expected", "HH:MM"));
    }
    if !(1..=MAX_PARTY_SIZE).contains(&req.party_size) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Number of guests must be between 1 and {MAX_PARTY_SIZE}"),
        )
        .with_detail("field", "party_size"));
    }
    if req
        .special_requests
        .as_deref()
        .is_some_and(|s| s.chars().count() > MAX_SPECIAL_REQUESTS_LEN)
    {
        return Err(AppError::validation(format!(
            "Special requests must be less than {MAX_SPECIAL_REQUESTS_LEN} characters"
        ))
        .with_detail("field", "special_requests"));
    }
    Ok(())
}

/// Guard, reserve the table and record the booking as one unit
pub async fn create_booking(
    state: &AppState,
    claims: &SessionClaims,
    req: &BookingCreate,
) -> ServiceResult<BookingCreated> {
    guard::require(claims, Action::CreateBooking, Some(req.restaurant_id))?;
    let customer_id = guard::require_customer(claims, Action::CreateBooking)?;
    validate(req)?;
    let time = normalize_time(&req.time)
        .ok_or_else(|| AppError::validation("Valid time is required (HH:MM)"))?;

    restaurants::find_active(&state.pool, req.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let booking_id = tokio::time::timeout(
        state.reservation_timeout,
        reserve_and_insert(&state.pool, customer_id, req, &time),
    )
    .await
    .map_err(|_| {
        tracing::warn!(
            table_id = req.table_id,
            restaurant_id = req.restaurant_id,
            "Table reservation timed out"
        );
        AppError::timeout("Table reservation timed out, please retry")
    })??;

    tracing::info!(
        booking_id,
        customer_id,
        restaurant_id = req.restaurant_id,
        table_id = req.table_id,
        "Booking created"
    );

    Ok(BookingCreated {
        booking_id,
        restaurant_id: req.restaurant_id,
        table_id: req.table_id,
        date: req.date.clone(),
        time,
        party_size: req.party_size,
        status: BookingStatus::Confirmed,
    })
}

async fn reserve_and_insert(
    pool: &SqlitePool,
    customer_id: i64,
    req: &BookingCreate,
    time: &str,
) -> ServiceResult<i64> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    ledger::try_reserve(&mut tx, req.table_id, req.restaurant_id, req.party_size, now).await?;

    let booking = NewBooking {
        customer_id,
        restaurant_id: req.restaurant_id,
        table_id: req.table_id,
        date: &req.date,
        time,
        party_size: req.party_size,
        special_requests: req.special_requests.as_deref().filter(|s| !s.is_empty()),
    };
    let booking_id = booking_db::insert(&mut tx, &booking, now).await?;

    tx.commit().await?;
    Ok(booking_id)
}

pub async fn list_own_bookings(
    state: &AppState,
    claims: &SessionClaims,
) -> ServiceResult<Vec<BookingDetail>> {
    let customer_id = guard::require_customer(claims, Action::ViewOwnBookings)?;
    Ok(booking_db::list_for_customer(&state.pool, customer_id).await?)
}

pub async fn get_own_booking(
    state: &AppState,
    claims: &SessionClaims,
    booking_id: i64,
) -> ServiceResult<BookingDetail> {
    let customer_id = guard::require_customer(claims, Action::ViewOwnBookings)?;
    booking_db::find_for_customer(&state.pool, customer_id, booking_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound).into())
}

/// Cancel the caller's confirmed booking and release its table
pub async fn cancel_booking(
    state: &AppState,
    claims: &SessionClaims,
    booking_id: i64,
) -> ServiceResult<BookingDetail> {
    let customer_id = guard::require_customer(claims, Action::CancelOwnBooking)?;
    let now = shared::util::now_millis();
    let mut tx = state.pool.begin().await?;

    let Some(table_id) = booking_db::cancel_confirmed(&mut tx, booking_id, customer_id, now).await?
    else {
        let existing = booking_db::find_by_id(&mut tx, booking_id).await?;
        return Err(match existing {
            Some(b) if b.customer_id == customer_id => AppError::with_message(
                ErrorCode::BookingNotCancellable,
                format!("Booking is already {}", b.status.as_str()),
            )
            .into(),
            _ => AppError::new(ErrorCode::BookingNotFound).into(),
        });
    };

    ledger::release(&mut tx, table_id, now).await?;
    tx.commit().await?;

    tracing::info!(booking_id, customer_id, table_id, "Booking cancelled");

    get_own_booking(state, claims, booking_id).await
}

pub async fn list_restaurant_bookings(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
) -> ServiceResult<Vec<BookingDetail>> {
    guard::require(claims, Action::ViewRestaurantBookings, Some(restaurant_id))?;
    Ok(booking_db::list_for_restaurant(&state.pool, restaurant_id).await?)
}

/// Admin status change on a table, keeping its booking consistent.
///
/// `reserved -> occupied` completes the active booking and
/// `reserved -> available` cancels it. Moving a table into `reserved` is
/// only possible through a booking.
pub async fn update_table_status(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
    table_id: i64,
    to: TableStatus,
) -> ServiceResult<DiningTable> {
    guard::require(claims, Action::ManageTables, Some(restaurant_id))?;

    if to == TableStatus::Reserved {
        return Err(AppError::with_message(
            ErrorCode::TableInvalidTransition,
            "Tables are reserved through bookings",
        )
        .into());
    }

    let table = ledger::find_in_restaurant(&state.pool, restaurant_id, table_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    let from = table.status;

    let now = shared::util::now_millis();
    let mut tx = state.pool.begin().await?;
    ledger::transition(&mut tx, table_id, from, to, now).await?;

    if from == TableStatus::Reserved {
        let closed = match to {
            TableStatus::Occupied => BookingStatus::Completed,
            _ => BookingStatus::Cancelled,
        };
        booking_db::close_active_for_table(&mut tx, table_id, closed, now).await?;
    }
    tx.commit().await?;

    tracing::info!(
        restaurant_id,
        table_id,
        from = from.as_str(),
        to = to.as_str(),
        "Table status changed"
    );

    Ok(DiningTable { status: to, ..table })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingCreate {
        BookingCreate {
            restaurant_id: 1,
            table_id: 5,
            date: "2026-11-02".into(),
            time: "19:30".into(),
            party_size: 4,
            special_requests: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_rejects_bad_date_and_time() {
        for date in ["2026-13-01", "02/11/2026", "2026-11-2", ""] {
            let req = BookingCreate {
                date: date.into(),
                ..request()
            };
            assert_eq!(validate(&req).unwrap_err().code, ErrorCode::ValidationFailed, "{date}");
        }
        for time in ["24:00", "19:30:00", "1930", "7:5", "19:3a", ":30"] {
            let req = BookingCreate {
                time: time.into(),
                ..request()
            };
            assert_eq!(validate(&req).unwrap_err().code, ErrorCode::ValidationFailed, "{time}");
        }
    }

    #[test]
    fn test_single_digit_hour_is_normalised() {
        let req = BookingCreate {
            time: "7:30".into(),
            ..request()
        };
        assert!(validate(&req).is_ok());
        assert_eq!(normalize_time("7:30").as_deref(), Some("07:30"));
        assert_eq!(normalize_time("19:05").as_deref(), Some("19:05"));
        assert_eq!(normalize_time("0:00").as_deref(), Some("00:00"));
        assert_eq!(normalize_time("23:60"), None);
    }

    #[test]
    fn test_party_size_bounds() {
        for size in [0, 21, -1] {
            let req = BookingCreate {
                party_size: size,
                ..request()
            };
            assert_eq!(validate(&req).unwrap_err().code, ErrorCode::ValueOutOfRange);
        }
        let req = BookingCreate {
            party_size: 20,
            ..request()
        };
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_special_requests_length() {
        let req = BookingCreate {
            special_requests: Some("x".repeat(501)),
            ..request()
        };
        assert!(validate(&req).is_err());
        let req = BookingCreate {
            special_requests: Some("x".repeat(500)),
            ..request()
        };
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn test_ledger_errors_map_to_codes() {
        let app: AppError = ServiceError::from(LedgerError::Unavailable {
            current: TableStatus::Reserved,
        })
        .into();
        assert_eq!(app.code, ErrorCode::TableUnavailable);
        assert_eq!(app.http_status(), http::StatusCode::BAD_REQUEST);

        let app: AppError = ServiceError::from(LedgerError::NotFound).into();
        assert_eq!(app.http_status(), http::StatusCode::NOT_FOUND);

        let app: AppError = ServiceError::from(LedgerError::CapacityExceeded {
            capacity: 2,
            party_size: 4,
        })
        .into();
        assert_eq!(app.code, ErrorCode::PartySizeExceedsCapacity);
    }
}
