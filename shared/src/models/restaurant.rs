//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create restaurant payload (super admin), including its admin credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub cuisine: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    /// Admin login code for the restaurant admin
    pub admin_id: String,
    pub admin_name: Option<String>,
    pub admin_password: String,
}

/// Result of restaurant creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreated {
    pub restaurant_id: i64,
    pub admin_id: String,
}

/// Toggle restaurant active flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantStatusUpdate {
    pub is_active: bool,
}
