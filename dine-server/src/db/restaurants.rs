use shared::models::Restaurant;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, name, cuisine, address, phone, description, is_active";

pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM restaurants WHERE is_active = 1 ORDER BY name"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_active(pool: &SqlitePool, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM restaurants WHERE id = ? AND is_active = 1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {COLUMNS} FROM restaurants WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    conn: &mut SqliteConnection,
    name: &str,
    cuisine: &str,
    address: Option<&str>,
    phone: Option<&str>,
    description: Option<&str>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO restaurants (name, cuisine, address, phone, description, is_active, created_at)
         VALUES (?, ?, ?, ?, ?, 1, ?)",
    )
    .bind(name)
    .bind(cuisine)
    .bind(address)
    .bind(phone)
    .bind(description)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE restaurants SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}
