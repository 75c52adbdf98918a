//! Data models
//!
//! Shared between the server and the web frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod booking;
pub mod dining_table;
pub mod menu;
pub mod order;
pub mod principal;
pub mod restaurant;

// Re-exports
pub use booking::*;
pub use dining_table::*;
pub use menu::*;
pub use order::*;
pub use principal::*;
pub use restaurant::*;
