use shared::models::{Order, OrderDetail, OrderLine, OrderStatus, OrderType};
use sqlx::{SqliteConnection, SqlitePool};

const DETAIL_SELECT: &str = "SELECT o.id AS id, o.customer_id AS customer_id,
        o.restaurant_id AS restaurant_id, o.order_type AS order_type, o.status AS status,
        o.total_cents AS total_cents, o.scheduled_time AS scheduled_time,
        o.special_instructions AS special_instructions, o.created_at AS created_at,
        o.updated_at AS updated_at, r.name AS restaurant_name
    FROM orders o
    JOIN restaurants r ON r.id = o.restaurant_id";

pub struct NewOrder<'a> {
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub order_type: OrderType,
    pub total_cents: i64,
    pub scheduled_time: Option<&'a str>,
    pub special_instructions: Option<&'a str>,
}

pub async fn insert(
    conn: &mut SqliteConnection,
    order: &NewOrder<'_>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO orders (customer_id, restaurant_id, order_type, status, total_cents,
                             scheduled_time, special_instructions, created_at, updated_at)
         VALUES (?, ?, ?, 'pending', ?, ?, ?, ?, ?)",
    )
    .bind(order.customer_id)
    .bind(order.restaurant_id)
    .bind(order.order_type)
    .bind(order.total_cents)
    .bind(order.scheduled_time)
    .bind(order.special_instructions)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    menu_item_id: i64,
    quantity: i64,
    price_cents: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO order_items (order_id, menu_item_id, quantity, price_cents)
         VALUES (?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(price_cents)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn list_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
) -> Result<Vec<OrderDetail>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{DETAIL_SELECT} WHERE o.customer_id = ? ORDER BY o.created_at DESC, o.id DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await
}

pub async fn find_for_customer(
    pool: &SqlitePool,
    customer_id: i64,
    id: i64,
) -> Result<Option<OrderDetail>, sqlx::Error> {
    sqlx::query_as(&format!("{DETAIL_SELECT} WHERE o.id = ? AND o.customer_id = ?"))
        .bind(id)
        .bind(customer_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_for_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> Result<Vec<OrderDetail>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{DETAIL_SELECT} WHERE o.restaurant_id = ? ORDER BY o.created_at DESC, o.id DESC"
    ))
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

pub async fn find_in_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
    id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await
}

pub async fn lines(pool: &SqlitePool, order_id: i64) -> Result<Vec<OrderLine>, sqlx::Error> {
    sqlx::query_as(
        "SELECT oi.menu_item_id AS menu_item_id, m.name AS item_name,
                oi.quantity AS quantity, oi.price_cents AS price_cents
         FROM order_items oi
         JOIN menu_items m ON m.id = oi.menu_item_id
         WHERE oi.order_id = ?
         ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
}

/// Conditional status change; `false` when the order is no longer in `from`
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}
