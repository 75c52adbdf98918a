use shared::models::MenuItem;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "id, restaurant_id, name, category, price_cents, description, is_available";

pub async fn list_for_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE restaurant_id = ? ORDER BY category, name"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

/// Fetch the subset of `ids` that belong to `restaurant_id`
pub async fn find_many_in_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i64,
    ids: &[i64],
) -> Result<Vec<MenuItem>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {COLUMNS} FROM menu_items WHERE restaurant_id = "
    ));
    qb.push_bind(restaurant_id).push(" AND id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    qb.build_query_as().fetch_all(&mut *conn).await
}

pub async fn create(
    pool: &SqlitePool,
    restaurant_id: i64,
    name: &str,
    category: &str,
    price_cents: i64,
    description: Option<&str>,
) -> Result<MenuItem, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO menu_items (restaurant_id, name, category, price_cents, description, is_available)
         VALUES (?, ?, ?, ?, ?, 1)",
    )
    .bind(restaurant_id)
    .bind(name)
    .bind(category)
    .bind(price_cents)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(MenuItem {
        id: result.last_insert_rowid(),
        restaurant_id,
        name: name.to_string(),
        category: category.to_string(),
        price_cents,
        description: description.map(str::to_string),
        is_available: true,
    })
}

pub async fn set_available(
    pool: &SqlitePool,
    restaurant_id: i64,
    id: i64,
    is_available: bool,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE menu_items SET is_available = ? WHERE id = ? AND restaurant_id = ?")
            .bind(is_available)
            .bind(id)
            .bind(restaurant_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() == 1)
}
