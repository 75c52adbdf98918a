//! Principal Model
//!
//! An authenticated actor: a customer, a restaurant admin, or the platform
//! super admin. The three kinds are disjoint and live in separate tables.

use serde::{Deserialize, Serialize};

/// Principal kind (the role carried in a session token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Customer,
    RestaurantAdmin,
    Superadmin,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::RestaurantAdmin => "restaurant_admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status, checked on every login and token verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
pub enum PrincipalStatus {
    Active,
    Disabled,
}

impl PrincipalStatus {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// Authenticated principal
///
/// `restaurant_id` is present only for [`PrincipalKind::RestaurantAdmin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub kind: PrincipalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<i64>,
    pub status: PrincipalStatus,
}

/// Public profile returned by login endpoints (never includes secrets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalProfile {
    pub id: i64,
    pub kind: PrincipalKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<i64>,
}
