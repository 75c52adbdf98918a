//! Dine Server - restaurant booking and authorization backend
//!
//! # Module layout
//!
//! ```text
//! dine-server/src/
//! ├── config.rs     # environment configuration
//! ├── state.rs      # shared application state
//! ├── error.rs      # service-layer error bridge
//! ├── auth/         # credentials, session tokens, guard, rate limits
//! ├── db/           # SQLite queries (table ledger lives in db/tables)
//! ├── services/     # booking, order and restaurant administration
//! └── api/          # HTTP routes and handlers
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;
pub mod util;

pub use api::create_router;
pub use auth::{SessionClaims, TokenService};
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
