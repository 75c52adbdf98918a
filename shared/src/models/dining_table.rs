//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table availability status
///
/// Lifecycle: `available ⇄ reserved ⇄ occupied ⇄ cleaning ⇄ available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type), sqlx(rename_all = "snake_case"))]
pub enum TableStatus {
    Available,
    Reserved,
    Occupied,
    Cleaning,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
            Self::Cleaning => "cleaning",
        }
    }

    /// Whether `self -> next` is an edge of the table lifecycle
    pub fn can_transition_to(self, next: TableStatus) -> bool {
        use TableStatus::*;
        matches!(
            (self, next),
            (Available, Reserved)
                | (Reserved, Available)
                | (Reserved, Occupied)
                | (Occupied, Reserved)
                | (Occupied, Cleaning)
                | (Cleaning, Occupied)
                | (Cleaning, Available)
                | (Available, Cleaning)
        )
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_number: i64,
    pub seat_capacity: i64,
    pub status: TableStatus,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: i64,
    pub seat_capacity: i64,
}

/// Admin table status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}
