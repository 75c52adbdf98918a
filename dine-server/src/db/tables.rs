//! Dining tables and the table availability ledger
//!
//! The `status` column of `dining_tables` is the single source of truth for
//! a table's availability. Every status change is a compare-and-swap: one
//! conditional `UPDATE` whose `WHERE` clause carries the expected current
//! state, succeeding iff exactly one row changed. SQLite serializes writers,
//! so each transition is linearizable per row without any application lock.

use shared::models::{DiningTable, TableStatus};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

/// Why a ledger transition did not happen
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No such table in the requested restaurant
    #[error("table not found")]
    NotFound,

    /// Party does not fit
    #[error("party of {party_size} exceeds table capacity {capacity}")]
    CapacityExceeded { capacity: i64, party_size: i64 },

    /// Table is not in the expected state
    #[error("table is {current}")]
    Unavailable { current: TableStatus },

    /// Edge not in the table lifecycle
    #[error("cannot move table from {from} to {to}")]
    InvalidTransition { from: TableStatus, to: TableStatus },

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(sqlx::FromRow)]
struct TableState {
    status: TableStatus,
    seat_capacity: i64,
}

/// Atomically move a table `available -> reserved`.
///
/// Succeeds only if the table belongs to `restaurant_id`, is currently
/// `available` and seats at least `party_size`. Of N concurrent callers
/// targeting the same table, exactly one gets `Ok`.
///
/// On conflict a diagnostic read classifies the failure. The read happens
/// after the failed write, so the reported state is advisory only.
pub async fn try_reserve(
    conn: &mut SqliteConnection,
    table_id: i64,
    restaurant_id: i64,
    party_size: i64,
    now: i64,
) -> Result<(), LedgerError> {
    let result = sqlx::query(
        "UPDATE dining_tables SET status = 'reserved', updated_at = ?
         WHERE id = ? AND restaurant_id = ? AND status = 'available' AND seat_capacity >= ?",
    )
    .bind(now)
    .bind(table_id)
    .bind(restaurant_id)
    .bind(party_size)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    let state: Option<TableState> = sqlx::query_as(
        "SELECT status, seat_capacity FROM dining_tables WHERE id = ? AND restaurant_id = ?",
    )
    .bind(table_id)
    .bind(restaurant_id)
    .fetch_optional(&mut *conn)
    .await?;

    Err(match state {
        None => LedgerError::NotFound,
        Some(s) if s.seat_capacity < party_size => LedgerError::CapacityExceeded {
            capacity: s.seat_capacity,
            party_size,
        },
        Some(s) => LedgerError::Unavailable { current: s.status },
    })
}

/// Compare-and-swap `from -> to` on one table.
///
/// Illegal lifecycle edges are rejected before touching storage.
pub async fn transition(
    conn: &mut SqliteConnection,
    table_id: i64,
    from: TableStatus,
    to: TableStatus,
    now: i64,
) -> Result<(), LedgerError> {
    if !from.can_transition_to(to) {
        return Err(LedgerError::InvalidTransition { from, to });
    }

    let result = sqlx::query(
        "UPDATE dining_tables SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
    )
    .bind(to)
    .bind(now)
    .bind(table_id)
    .bind(from)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    let current: Option<TableStatus> =
        sqlx::query_scalar("SELECT status FROM dining_tables WHERE id = ?")
            .bind(table_id)
            .fetch_optional(&mut *conn)
            .await?;

    Err(match current {
        None => LedgerError::NotFound,
        Some(current) => LedgerError::Unavailable { current },
    })
}

/// `reserved -> available`
pub async fn release(conn: &mut SqliteConnection, table_id: i64, now: i64) -> Result<(), LedgerError> {
    transition(conn, table_id, TableStatus::Reserved, TableStatus::Available, now).await
}

/// `reserved -> occupied`
pub async fn mark_occupied(
    conn: &mut SqliteConnection,
    table_id: i64,
    now: i64,
) -> Result<(), LedgerError> {
    transition(conn, table_id, TableStatus::Reserved, TableStatus::Occupied, now).await
}

// ── Table rows ──

pub async fn list_for_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> Result<Vec<DiningTable>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, restaurant_id, table_number, seat_capacity, status
         FROM dining_tables WHERE restaurant_id = ? ORDER BY table_number",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

pub async fn find_in_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
    table_id: i64,
) -> Result<Option<DiningTable>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, restaurant_id, table_number, seat_capacity, status
         FROM dining_tables WHERE id = ? AND restaurant_id = ?",
    )
    .bind(table_id)
    .bind(restaurant_id)
    .fetch_optional(pool)
    .await
}

pub async fn status_of(pool: &SqlitePool, table_id: i64) -> Result<Option<TableStatus>, sqlx::Error> {
    sqlx::query_scalar("SELECT status FROM dining_tables WHERE id = ?")
        .bind(table_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    table_number: i64,
    seat_capacity: i64,
    now: i64,
) -> Result<DiningTable, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO dining_tables (restaurant_id, table_number, seat_capacity, status, updated_at)
         VALUES (?, ?, ?, 'available', ?)",
    )
    .bind(restaurant_id)
    .bind(table_number)
    .bind(seat_capacity)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(DiningTable {
        id: result.last_insert_rowid(),
        restaurant_id,
        table_number,
        seat_capacity,
        status: TableStatus::Available,
    })
}
