//! Restaurant administration: platform-level restaurant lifecycle and the
//! per-restaurant table and menu setup.

use shared::error::{AppError, ErrorCode};
use shared::models::{
    DiningTable, DiningTableCreate, MenuItem, MenuItemCreate, PrincipalKind, Restaurant,
    RestaurantCreate, RestaurantCreated,
};

use crate::auth::credentials::{self, Registration};
use crate::auth::guard::{self, Action};
use crate::auth::token::SessionClaims;
use crate::db::{menu, restaurants, tables};
use crate::error::{ServiceResult, is_unique_violation};
use crate::state::AppState;

pub const MAX_TABLE_CAPACITY: i64 = 20;

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} is required"),
        )
        .with_detail("field", field));
    }
    Ok(value)
}

/// Create a restaurant together with its admin credential (one transaction)
pub async fn create_restaurant(
    state: &AppState,
    claims: &SessionClaims,
    req: &RestaurantCreate,
) -> ServiceResult<RestaurantCreated> {
    guard::require(claims, Action::ManageRestaurants, None)?;

    let name = required("name", &req.name)?;
    let cuisine = required("cuisine", &req.cuisine)?;
    let admin_id = required("admin_id", &req.admin_id)?;

    let now = shared::util::now_millis();
    let mut tx = state.pool.begin().await?;

    let restaurant_id = restaurants::create(
        &mut tx,
        name,
        cuisine,
        req.address.as_deref(),
        req.phone.as_deref(),
        req.description.as_deref(),
        now,
    )
    .await?;

    let admin_name = req
        .admin_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{name} Admin"));
    credentials::register(
        &mut tx,
        Registration {
            kind: PrincipalKind::RestaurantAdmin,
            identity: admin_id,
            secret: &req.admin_password,
            name: &admin_name,
            phone: None,
            restaurant_id: Some(restaurant_id),
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(restaurant_id, admin_id, "Restaurant created");

    Ok(RestaurantCreated {
        restaurant_id,
        admin_id: admin_id.to_string(),
    })
}

pub async fn set_restaurant_active(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
    is_active: bool,
) -> ServiceResult<Restaurant> {
    guard::require(claims, Action::ManageRestaurants, Some(restaurant_id))?;

    if !restaurants::set_active(&state.pool, restaurant_id, is_active).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound).into());
    }
    tracing::info!(restaurant_id, is_active, "Restaurant status changed");

    restaurants::find_by_id(&state.pool, restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound).into())
}

pub async fn add_table(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
    req: &DiningTableCreate,
) -> ServiceResult<DiningTable> {
    guard::require(claims, Action::ManageTables, Some(restaurant_id))?;

    if req.table_number < 1 {
        return Err(AppError::validation("Table number must be positive").into());
    }
    if !(1..=MAX_TABLE_CAPACITY).contains(&req.seat_capacity) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Seat capacity must be between 1 and {MAX_TABLE_CAPACITY}"),
        )
        .into());
    }
    restaurants::find_by_id(&state.pool, restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    let now = shared::util::now_millis();
    match tables::create(&state.pool, restaurant_id, req.table_number, req.seat_capacity, now).await
    {
        Ok(table) => Ok(table),
        Err(e) if is_unique_violation(&e) => Err(AppError::new(ErrorCode::TableNumberExists)
            .with_detail("table_number", req.table_number)
            .into()),
        Err(e) => Err(e.into()),
    }
}

pub async fn add_menu_item(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
    req: &MenuItemCreate,
) -> ServiceResult<MenuItem> {
    guard::require(claims, Action::ManageMenu, Some(restaurant_id))?;

    let name = required("name", &req.name)?;
    let category = required("category", &req.category)?;
    if req.price_cents < 0 {
        return Err(AppError::with_message(ErrorCode::ValueOutOfRange, "Price cannot be negative").into());
    }
    restaurants::find_by_id(&state.pool, restaurant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    Ok(menu::create(
        &state.pool,
        restaurant_id,
        name,
        category,
        req.price_cents,
        req.description.as_deref(),
    )
    .await?)
}

pub async fn set_menu_item_available(
    state: &AppState,
    claims: &SessionClaims,
    restaurant_id: i64,
    menu_item_id: i64,
    is_available: bool,
) -> ServiceResult<()> {
    guard::require(claims, Action::ManageMenu, Some(restaurant_id))?;

    if !menu::set_available(&state.pool, restaurant_id, menu_item_id, is_available).await? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).into());
    }
    Ok(())
}
