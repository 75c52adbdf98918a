//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity (price in cents)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub description: Option<String>,
    pub is_available: bool,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub description: Option<String>,
}

/// Toggle whether a menu item can be ordered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuAvailabilityUpdate {
    pub is_available: bool,
}
