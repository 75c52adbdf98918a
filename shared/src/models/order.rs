//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the order is fulfilled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
pub enum OrderType {
    Pickup,
    Delivery,
    #[serde(alias = "dine-in")]
    DineIn,
}

impl OrderType {
    /// Estimated preparation window shown to the customer
    pub fn estimated_time(&self) -> &'static str {
        match self {
            Self::Delivery => "45-60 minutes",
            Self::Pickup | Self::DineIn => "20-30 minutes",
        }
    }
}

/// Order status
///
/// Admins move an order freely among the open statuses; `completed` and
/// `cancelled` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        !self.is_final() && self != next
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity (money in cents)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub scheduled_time: Option<String>,
    pub special_instructions: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One ordered item with the price charged at order time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub menu_item_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub price_cents: i64,
}

/// Order joined with its restaurant name and lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub order: Order,
    pub restaurant_name: String,
    #[serde(default)]
    #[cfg_attr(feature = "db", sqlx(skip))]
    pub items: Vec<OrderLine>,
}

/// Admin order status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// One line of an order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i64,
}

/// Create order payload
///
/// `total_amount` is the client's view of the total in currency units; the
/// server recomputes it from menu prices and rejects a mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub restaurant_id: i64,
    pub order_type: OrderType,
    pub items: Vec<OrderItemInput>,
    pub total_amount: Decimal,
    pub scheduled_time: Option<String>,
    pub special_instructions: Option<String>,
}

/// Order creation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: i64,
    pub restaurant_name: String,
    pub order_type: OrderType,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub estimated_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_accepts_hyphenated_dine_in() {
        let t: OrderType = serde_json::from_str("\"dine-in\"").unwrap();
        assert_eq!(t, OrderType::DineIn);
        let t: OrderType = serde_json::from_str("\"dine_in\"").unwrap();
        assert_eq!(t, OrderType::DineIn);
    }

    #[test]
    fn test_final_statuses_do_not_move() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Ready.can_transition_to(Completed));
        assert!(Preparing.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
        for next in [Pending, Confirmed, Preparing, Ready, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_order_create_parses_float_total() {
        let json = r#"{"restaurant_id":1,"order_type":"pickup","items":[{"menu_item_id":3,"quantity":2}],"total_amount":25.5}"#;
        let req: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(req.total_amount, Decimal::new(2550, 2));
        assert_eq!(req.items.len(), 1);
        assert!(req.scheduled_time.is_none());
    }
}
