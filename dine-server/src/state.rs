//! Application state for dine-server

use std::sync::Arc;
use std::time::Duration;

use shared::models::PrincipalKind;
use sqlx::SqlitePool;

use crate::auth::credentials::{self, CredentialError, Registration};
use crate::auth::rate_limit::RateLimiter;
use crate::auth::token::{TokenConfig, TokenService};
use crate::config::Config;
use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Session token issuer/verifier
    pub tokens: TokenService,
    /// Platform security code for super admin login
    pub superadmin_security_code: Arc<str>,
    /// Deadline for the reserve-and-book step
    pub reservation_timeout: Duration,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Connect, migrate and bootstrap
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_url, config.reservation_timeout).await?;
        let state = Self::with_pool(pool, config);

        if let Some(bootstrap) = &config.bootstrap_superadmin {
            state
                .ensure_superadmin(&bootstrap.email, &bootstrap.password)
                .await?;
        }

        Ok(state)
    }

    /// Build state around an existing (already migrated) pool
    pub fn with_pool(pool: SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            tokens: TokenService::new(TokenConfig::from(config)),
            superadmin_security_code: Arc::from(config.superadmin_security_code.as_str()),
            reservation_timeout: config.reservation_timeout,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Create the super admin unless the email is already registered
    pub async fn ensure_superadmin(&self, email: &str, password: &str) -> Result<(), BoxError> {
        let mut conn = self.pool.acquire().await?;
        let reg = Registration {
            kind: PrincipalKind::Superadmin,
            identity: email,
            secret: password,
            name: "Platform Owner",
            phone: None,
            restaurant_id: None,
        };
        match credentials::register(&mut conn, reg).await {
            Ok(id) => {
                tracing::info!(superadmin_id = id, "Bootstrap super admin created");
                Ok(())
            }
            Err(CredentialError::DuplicateIdentity) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
