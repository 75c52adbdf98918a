use shared::models::{Booking, BookingDetail, BookingStatus};
use sqlx::{SqliteConnection, SqlitePool};

const DETAIL_SELECT: &str = "SELECT b.id AS id, b.customer_id AS customer_id,
        b.restaurant_id AS restaurant_id, b.table_id AS table_id, b.date AS date, b.time AS time,
        b.party_size AS party_size, b.special_requests AS special_requests, b.status AS status,
        b.created_at AS created_at, b.updated_at AS updated_at,
        r.name AS restaurant_name, t.table_number AS table_number
    FROM bookings b
    JOIN restaurants r ON r.id = b.restaurant_id
    JOIN dining_tables t ON t.id = b.table_id";

/// Fields of a booking to insert
pub struct NewBooking<'a> {
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub table_id: i64,
    pub date: &'a str,
    pub time: &'a str,
    pub party_size: i64,
    pub special_requests: Option<&'a str>,
}

pub async fn insert(
    conn: &mut SqliteConnection,
    booking: &NewBooking<'_>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO bookings (customer_id, restaurant_id, table_id, date, time, party_size,
                               special_requests, status, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, 'confirmed', ?, ?)",
    )
    .bind(booking.customer_id)
    .bind(booking.restaurant_id)
    .bind(booking.table_id)
    .bind(booking.date)
    .bind(booking.time)
    .bind(booking.party_size)
    .bind(booking.special_requests)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Booking>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM bookings WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn list_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> Result<Vec<BookingDetail>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{DETAIL_SELECT} WHERE b.customer_id = ? ORDER BY b.date DESC, b.time DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await
}

pub async fn find_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
    id: i64,
) -> Result<Option<BookingDetail>, sqlx::Error> {
    sqlx::query_as(&format!("{DETAIL_SELECT} WHERE b.id = ? AND b.customer_id = ?"))
        .bind(id)
        .bind(customer_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_for_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> Result<Vec<BookingDetail>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{DETAIL_SELECT} WHERE b.restaurant_id = ? ORDER BY b.date DESC, b.time DESC"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

/// Flip the caller's confirmed booking to cancelled, returning its table.
///
/// `None` when the booking is missing, not owned by the caller, or no
/// longer confirmed.
pub async fn cancel_confirmed(
    conn: &mut SqliteConnection,
    id: i64,
    customer_id: i64,
    now: i64,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        "UPDATE bookings SET status = 'cancelled', updated_at = ?
         WHERE id = ? AND customer_id = ? AND status = 'confirmed'
         RETURNING table_id",
    )
    .bind(now)
    .bind(id)
    .bind(customer_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Close the active booking on a table (admin seating or freeing it).
pub async fn close_active_for_table(
    conn: &mut SqliteConnection,
    table_id: i64,
    status: BookingStatus,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE bookings SET status = ?, updated_at = ?
         WHERE table_id = ? AND status = 'confirmed'",
    )
    .bind(status)
    .bind(now)
    .bind(table_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub async fn count_active_for_table(pool: &SqlitePool, table_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE table_id = ? AND status = 'confirmed'")
        .bind(table_id)
        .fetch_one(pool)
        .await
}
