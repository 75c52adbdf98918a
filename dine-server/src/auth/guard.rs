//! Authorization guard
//!
//! Maps verified claims plus a requested (action, restaurant) pair to an
//! allow/deny decision:
//!
//! | Principal          | Customer-scoped | Restaurant-scoped          | Platform |
//! |--------------------|-----------------|----------------------------|----------|
//! | `superadmin`       | allow           | allow                      | allow    |
//! | `restaurant_admin` | `WrongRole`     | allow iff same restaurant  | `WrongRole` |
//! | `customer`         | allow           | `WrongRole`                | `WrongRole` |

use shared::error::AppError;
use shared::models::PrincipalKind;

use crate::auth::token::SessionClaims;

/// Operations the guard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateBooking,
    ViewOwnBookings,
    CancelOwnBooking,
    CreateOrder,
    ViewOwnOrders,
    ViewRestaurantBookings,
    ManageTables,
    ManageMenu,
    ManageOrders,
    ManageRestaurants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Customer,
    Restaurant,
    Platform,
}

impl Action {
    pub fn scope(self) -> Scope {
        match self {
            Self::CreateBooking
            | Self::ViewOwnBookings
            | Self::CancelOwnBooking
            | Self::CreateOrder
            | Self::ViewOwnOrders => Scope::Customer,
            Self::ViewRestaurantBookings
            | Self::ManageTables
            | Self::ManageMenu
            | Self::ManageOrders => Scope::Restaurant,
            Self::ManageRestaurants => Scope::Platform,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateBooking => "create_booking",
            Self::ViewOwnBookings => "view_own_bookings",
            Self::CancelOwnBooking => "cancel_own_booking",
            Self::CreateOrder => "create_order",
            Self::ViewOwnOrders => "view_own_orders",
            Self::ViewRestaurantBookings => "view_restaurant_bookings",
            Self::ManageTables => "manage_tables",
            Self::ManageMenu => "manage_menu",
            Self::ManageOrders => "manage_orders",
            Self::ManageRestaurants => "manage_restaurants",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deny {
    WrongRole,
    WrongRestaurant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Deny),
}

impl From<Deny> for AppError {
    fn from(d: Deny) -> Self {
        match d {
            Deny::WrongRole => AppError::wrong_role(),
            Deny::WrongRestaurant => AppError::wrong_restaurant(),
        }
    }
}

/// Pure rule evaluation
pub fn authorize(
    claims: &SessionClaims,
    action: Action,
    resource_restaurant_id: Option<i64>,
) -> Decision {
    match (claims.kind, action.scope()) {
        (PrincipalKind::Superadmin, _) => Decision::Allow,
        (PrincipalKind::RestaurantAdmin, Scope::Restaurant) => {
            match (claims.restaurant_id, resource_restaurant_id) {
                (Some(own), Some(requested)) if own == requested => Decision::Allow,
                _ => Decision::Deny(Deny::WrongRestaurant),
            }
        }
        (PrincipalKind::Customer, Scope::Customer) => Decision::Allow,
        _ => Decision::Deny(Deny::WrongRole),
    }
}

/// Evaluate the guard and turn a denial into a logged `AppError`
pub fn require(
    claims: &SessionClaims,
    action: Action,
    resource_restaurant_id: Option<i64>,
) -> Result<(), AppError> {
    match authorize(claims, action, resource_restaurant_id) {
        Decision::Allow => Ok(()),
        Decision::Deny(reason) => {
            crate::security_log!(
                "WARN",
                "access_denied",
                principal_id = claims.principal_id,
                kind = claims.kind.as_str(),
                action = action.as_str(),
                reason = format!("{reason:?}"),
                restaurant_id = format!("{resource_restaurant_id:?}")
            );
            Err(reason.into())
        }
    }
}

/// Records owned by the caller (bookings, orders) need a customer principal.
///
/// A super admin passes [`authorize`] for customer-scoped actions but owns
/// no bookings, so this returns `WrongRole` for anything but a customer.
pub fn require_customer(claims: &SessionClaims, action: Action) -> Result<i64, AppError> {
    require(claims, action, None)?;
    if !claims.is_customer() {
        return Err(Deny::WrongRole.into());
    }
    Ok(claims.principal_id)
}
