//! Order service
//!
//! Prices always come from the menu; the client's total is only checked
//! against the computed one. Customers read their own orders and restaurant
//! admins move orders of their restaurant through the status lifecycle.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    MenuItem, Order, OrderCreate, OrderCreated, OrderDetail, OrderItemInput, OrderStatus,
};
use sqlx::SqlitePool;

use crate::auth::guard::{self, Action};
use crate::auth::token::SessionClaims;
use crate::db::orders::{self as order_db, NewOrder};
use crate::db::{menu, restaurants};
use crate::error::ServiceResult;
use crate::state::AppState;

pub const MAX_INSTRUCTIONS_LEN: usize = 500;
pub const MAX_ITEM_QUANTITY: i64 = 100;

/// Accepted difference between client and computed totals
fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

pub fn validate(req: &OrderCreate) -> Result<(), AppError> {
    if req.restaurant_id < 1 {
        return Err(AppError::validation("Valid restaurant ID is required"));
    }
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if let Some(item) = req.items.iter().find(|i| i.menu_item_id < 1 || i.quantity < 1) {
        return Err(AppError::validation("Quantity must be at least 1")
            .with_detail("menu_item_id", item.menu_item_id));
    }
    if let Some(item) = req.items.iter().find(|i| i.quantity > MAX_ITEM_QUANTITY) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Quantity must be at most {MAX_ITEM_QUANTITY}"),
        )
        .with_detail("menu_item_id", item.menu_item_id));
    }
    if req.total_amount.is_sign_negative() {
        return Err(AppError::validation("Valid total amount is required"));
    }
    if req
        .special_instructions
        .as_deref()
        .is_some_and(|s| s.chars().count() > MAX_INSTRUCTIONS_LEN)
    {
        return Err(AppError::validation(format!(
            "Special instructions must be less than {MAX_INSTRUCTIONS_LEN} characters"
        )));
    }
    if let Some(ts) = req.scheduled_time.as_deref()
        && chrono::DateTime::parse_from_rfc3339(ts).is_err()
        && chrono::NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M").is_err()
    {
        return Err(AppError::validation("Valid scheduled time is required"));
    }
    Ok(())
}

pub async fn create_order(
    state: &AppState,
    claims: &SessionClaims,
    req: &OrderCreate,
) -> ServiceResult<OrderCreated> {
    guard::require(claims, Action::CreateOrder, Some(req.restaurant_id))?;
    let customer_id = guard::require_customer(claims, Action::CreateOrder)?;
    validate(req)?;

    let restaurant = restaurants::find_active(&state.pool, req.restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let ids: Vec<i64> = req
        .items
        .iter()
        .map(|i| i.menu_item_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let found = {
        let mut conn = state.pool.acquire().await?;
        menu::find_many_in_restaurant(&mut conn, req.restaurant_id, &ids).await?
    };
    let by_id: HashMap<i64, MenuItem> = found.into_iter().map(|m| (m.id, m)).collect();

    let mut lines = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let Some(menu_item) = by_id.get(&item.menu_item_id) else {
            return Err(AppError::with_message(
                ErrorCode::MenuItemNotFound,
                "One or more menu items not found",
            )
            .with_detail("menu_item_id", item.menu_item_id)
            .into());
        };
        lines.push((item, menu_item));
    }

    let mut unavailable: Vec<&str> = by_id
        .values()
        .filter(|m| !m.is_available)
        .map(|m| m.name.as_str())
        .collect();
    if !unavailable.is_empty() {
        unavailable.sort_unstable();
        return Err(AppError::with_message(
            ErrorCode::MenuItemUnavailable,
            format!("Some items are not available: {}", unavailable.join(", ")),
        )
        .into());
    }

    let total_cents = order_total_cents(&lines)?;
    let computed = Decimal::new(total_cents, 2);
    if (computed - req.total_amount).abs() > tolerance() {
        return Err(AppError::with_message(
            ErrorCode::OrderTotalMismatch,
            format!(
                "Total amount mismatch. Expected: {}, Received: {}",
                computed,
                req.total_amount.round_dp(2)
            ),
        )
        .with_detail("expected", computed.to_string())
        .into());
    }

    let now = shared::util::now_millis();
    let order = NewOrder {
        customer_id,
        restaurant_id: req.restaurant_id,
        order_type: req.order_type,
        total_cents,
        scheduled_time: req.scheduled_time.as_deref(),
        special_instructions: req.special_instructions.as_deref().filter(|s| !s.is_empty()),
    };

    let mut tx = state.pool.begin().await?;
    let order_id = order_db::insert(&mut tx, &order, now).await?;
    for (item, menu_item) in &lines {
        order_db::insert_item(
            &mut tx,
            order_id,
            item.menu_item_id,
            item.quantity,
            menu_item.price_cents,
        )
        .await?;
    }
    tx.commit().await?;

    tracing::info!(
        order_id,
        customer_id,
        restaurant_id = req.restaurant_id,
        total_cents,
        "Order created"
    );

    Ok(OrderCreated {
        order_id,
        restaurant_name: restaurant.name,
        order_type: req.order_type,
        total_amount: computed,
        status: OrderStatus::Pending,
        estimated_time: req.order_type.estimated_time().to_string(),
    })
}

async fn with_lines(pool: &SqlitePool, mut detail: OrderDetail) -> ServiceResult<OrderDetail> {
    detail.items = order_db::lines(pool, detail.order.id).await?;
    Ok(detail)
}

pub async fn list_own_orders(
    state: &AppState,
    claims: &SessionClaims,
) -> ServiceResult<Vec<OrderDetail>> {
    let customer_id = guard::require_customer(claims, Action::ViewOwnOrders)?;
    let orders = order_db::list_for_customer(&state.pool, customer_id).await?;
    let mut out = Vec::with_capacity(orders.len());
    for detail in orders {
        out.push(with_lines(&state.pool, detail).await?);
    }
    Ok(out)
}

/// The caller's order with its lines; another customer's order is `OrderNotFound`
pub async fn get_own_order(
    state: &AppState,
    claims: &SessionClaims,
    order_id: i64,
) -> ServiceResult<OrderDetail> {
    let customer_id = guard::require_customer(claims, Action::ViewOwnOrders)?;
    let detail = order_db::find_for_customer(&state.pool, customer_id, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    with_lines(&state.pool, detail).await
}

pub async fn list_restaurant_orders(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
) -> ServiceResult<Vec<OrderDetail>> {
    guard::require(claims, Action::ManageOrders, Some(restaurant_id))?;
    let orders = order_db::list_for_restaurant(&state.pool, restaurant_id).await?;
    let mut out = Vec::with_capacity(orders.len());
    for detail in orders {
        out.push(with_lines(&state.pool, detail).await?);
    }
    Ok(out)
}

pub async fn update_order_status(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
    order_id: i64,
    to: OrderStatus,
) -> ServiceResult<Order> {
    guard::require(claims, Action::ManageOrders, Some(restaurant_id))?;

    let order = order_db::find_in_restaurant(&state.pool, restaurant_id, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let from = order.status;
    let refused = || {
        AppError::with_message(
            ErrorCode::OrderInvalidTransition,
            format!("Cannot change order status from {from} to {to}"),
        )
    };
    if !from.can_transition_to(to) {
        return Err(refused().into());
    }

    let now = shared::util::now_millis();
    if !order_db::update_status(&state.pool, order_id, from, to, now).await? {
        return Err(refused().into());
    }

    tracing::info!(
        restaurant_id,
        order_id,
        principal_id = claims.principal_id,
        from = from.as_str(),
        to = to.as_str(),
        "Order status changed"
    );

    Ok(Order {
        status: to,
        updated_at: now,
        ..order
    })
}

/// Sum of `price * quantity`, refusing totals that overflow
fn order_total_cents(lines: &[(&OrderItemInput, &MenuItem)]) -> Result<i64, AppError> {
    lines
        .iter()
        .try_fold(0i64, |acc, (item, menu_item)| {
            menu_item
                .price_cents
                .checked_mul(item.quantity)
                .and_then(|line| acc.checked_add(line))
        })
        .ok_or_else(|| AppError::with_message(ErrorCode::ValueOutOfRange, "Order total is too large"))
}
