//! Customers, restaurant admins and super admins
//!
//! Each principal kind has its own table; the login identity is the email
//! for customers and super admins and the admin code for restaurant admins.

use shared::models::{PrincipalKind, PrincipalProfile, PrincipalStatus};
use sqlx::{SqliteConnection, SqlitePool};

/// Stored secret for one principal
#[derive(sqlx::FromRow)]
pub struct CredentialRow {
    pub id: i64,
    pub password_hash: String,
    pub status: PrincipalStatus,
    pub restaurant_id: Option<i64>,
}

/// Status snapshot used when verifying a session token
#[derive(sqlx::FromRow)]
pub struct StatusRow {
    pub status: PrincipalStatus,
    pub restaurant_id: Option<i64>,
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    name: String,
    email: Option<String>,
    restaurant_id: Option<i64>,
}

pub async fn find_credential(
    pool: &SqlitePool,
    kind: PrincipalKind,
    identity: &str,
) -> Result<Option<CredentialRow>, sqlx::Error> {
    let sql = match kind {
        PrincipalKind::Customer => {
            "SELECT id, password_hash, status, NULL AS restaurant_id FROM customers WHERE email = ?"
        }
        PrincipalKind::RestaurantAdmin => {
            "SELECT id, password_hash, status, restaurant_id FROM restaurant_admins WHERE admin_code = ?"
        }
        PrincipalKind::Superadmin => {
            "SELECT id, password_hash, status, NULL AS restaurant_id FROM superadmins WHERE email = ?"
        }
    };
    sqlx::query_as(sql).bind(identity).fetch_optional(pool).await
}

pub async fn find_status(
    pool: &SqlitePool,
    kind: PrincipalKind,
    id: i64,
) -> Result<Option<StatusRow>, sqlx::Error> {
    let sql = match kind {
        PrincipalKind::Customer => "SELECT status, NULL AS restaurant_id FROM customers WHERE id = ?",
        PrincipalKind::RestaurantAdmin => {
            "SELECT status, restaurant_id FROM restaurant_admins WHERE id = ?"
        }
        PrincipalKind::Superadmin => {
            "SELECT status, NULL AS restaurant_id FROM superadmins WHERE id = ?"
        }
    };
    sqlx::query_as(sql).bind(id).fetch_optional(pool).await
}

pub async fn identity_exists(
    conn: &mut SqliteConnection,
    kind: PrincipalKind,
    identity: &str,
) -> Result<bool, sqlx::Error> {
    let sql = match kind {
        PrincipalKind::Customer => "SELECT COUNT(*) FROM customers WHERE email = ?",
        PrincipalKind::RestaurantAdmin => {
            "SELECT COUNT(*) FROM restaurant_admins WHERE admin_code = ?"
        }
        PrincipalKind::Superadmin => "SELECT COUNT(*) FROM superadmins WHERE email = ?",
    };
    let count: i64 = sqlx::query_scalar(sql)
        .bind(identity)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

pub async fn insert_customer(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    phone: Option<&str>,
    password_hash: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO customers (name, email, phone, password_hash, status, created_at)
         VALUES (?, ?, ?, ?, 'active', ?)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(password_hash)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_restaurant_admin(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    admin_code: &str,
    name: &str,
    password_hash: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO restaurant_admins (restaurant_id, admin_code, name, password_hash, status, created_at)
         VALUES (?, ?, ?, ?, 'active', ?)",
    )
    .bind(restaurant_id)
    .bind(admin_code)
    .bind(name)
    .bind(password_hash)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_superadmin(
    conn: &mut SqliteConnection,
    name: &str,
    email: &str,
    password_hash: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO superadmins (name, email, password_hash, status, created_at)
         VALUES (?, ?, ?, 'active', ?)",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn set_status(
    pool: &SqlitePool,
    kind: PrincipalKind,
    id: i64,
    status: PrincipalStatus,
) -> Result<bool, sqlx::Error> {
    let sql = match kind {
        PrincipalKind::Customer => "UPDATE customers SET status = ? WHERE id = ?",
        PrincipalKind::RestaurantAdmin => "UPDATE restaurant_admins SET status = ? WHERE id = ?",
        PrincipalKind::Superadmin => "UPDATE superadmins SET status = ? WHERE id = ?",
    };
    let result = sqlx::query(sql).bind(status).bind(id).execute(pool).await?;
    Ok(result.rows_affected() == 1)
}

pub async fn get_profile(
    pool: &SqlitePool,
    kind: PrincipalKind,
    id: i64,
) -> Result<Option<PrincipalProfile>, sqlx::Error> {
    let sql = match kind {
        PrincipalKind::Customer => {
            "SELECT id, name, email, NULL AS restaurant_id FROM customers WHERE id = ?"
        }
        PrincipalKind::RestaurantAdmin => {
            "SELECT id, name, NULL AS email, restaurant_id FROM restaurant_admins WHERE id = ?"
        }
        PrincipalKind::Superadmin => {
            "SELECT id, name, email, NULL AS restaurant_id FROM superadmins WHERE id = ?"
        }
    };
    let row: Option<ProfileRow> = sqlx::query_as(sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(|r| PrincipalProfile {
        id: r.id,
        kind,
        name: r.name,
        email: r.email,
        restaurant_id: r.restaurant_id,
    }))
}
