//! Server configuration

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Minimum accepted length of `JWT_SECRET` outside development
const MIN_JWT_SECRET_LEN: usize = 32;

const JWT_EXPIRY_HOURS_RANGE: RangeInclusive<i64> = 1..=8760;
const RESERVATION_TIMEOUT_MS_RANGE: RangeInclusive<u64> = 1..=60_000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HMAC key for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub jwt_expiry_hours: i64,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Platform security code required by super admin login
    pub superadmin_security_code: String,
    /// Deadline for the reserve-and-book step
    pub reservation_timeout: Duration,
    /// Optional first super admin, created at startup if missing
    pub bootstrap_superadmin: Option<BootstrapSuperadmin>,
}

/// Credentials for the super admin created at startup
#[derive(Clone)]
pub struct BootstrapSuperadmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapSuperadmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapSuperadmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(
        name: &str,
        environment: &str,
        dev_default: impl FnOnce() -> String,
    ) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                tracing::warn!("{name} not set, using a development value");
                dev_default()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Read a numeric env var; unset means `default`, anything malformed or
    /// outside `range` is a startup error.
    fn parse_or<T>(name: &str, default: T, range: RangeInclusive<T>) -> Result<T, BoxError>
    where
        T: FromStr + PartialOrd + Display,
        T::Err: Display,
    {
        parse_value(name, std::env::var(name).ok(), default, range)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let jwt_secret = Self::require_secret("JWT_SECRET", &environment, || {
            format!("dev-JWT_SECRET-not-for-production-{}", crate::util::generate_code())
        })?;
        if environment != "development" && jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(format!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters").into());
        }

        let superadmin_security_code =
            Self::require_secret("SUPERADMIN_SECURITY_CODE", &environment, || {
                let code = crate::util::generate_code();
                tracing::warn!("Development super admin security code: {code}");
                code
            })?;

        let bootstrap_superadmin = match (
            std::env::var("BOOTSTRAP_SUPERADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            std::env::var("BOOTSTRAP_SUPERADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        ) {
            (Some(email), Some(password)) => Some(BootstrapSuperadmin { email, password }),
            (None, None) => None,
            _ => {
                return Err(
                    "BOOTSTRAP_SUPERADMIN_EMAIL and BOOTSTRAP_SUPERADMIN_PASSWORD must be set together"
                        .into(),
                );
            }
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://dine.db?mode=rwc".into()),
            http_port: Self::parse_or("HTTP_PORT", 3001, 0..=u16::MAX)?,
            environment,
            jwt_secret,
            jwt_expiry_hours: Self::parse_or("JWT_EXPIRY_HOURS", 24, JWT_EXPIRY_HOURS_RANGE)?,
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dine-server".into()),
            jwt_audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "dine-clients".into()),
            superadmin_security_code,
            reservation_timeout: Duration::from_millis(Self::parse_or(
                "RESERVATION_TIMEOUT_MS",
                2000,
                RESERVATION_TIMEOUT_MS_RANGE,
            )?),
            bootstrap_superadmin,
        })
    }

    /// Development configuration with fixed secrets, used by tests
    pub fn development(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: "dev-JWT_SECRET-not-for-production-0123456789".into(),
            jwt_expiry_hours: 24,
            jwt_issuer: "dine-server".into(),
            jwt_audience: "dine-clients".into(),
            superadmin_security_code: "777888".into(),
            reservation_timeout: Duration::from_millis(2000),
            bootstrap_superadmin: None,
        }
    }
}

fn parse_value<T>(
    name: &str,
    raw: Option<String>,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, BoxError>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| format!("{name}={raw:?} is not a valid number: {e}"))?;
    if !range.contains(&value) {
        return Err(format!(
            "{name}={value} is out of range ({}..={})",
            range.start(),
            range.end()
        )
        .into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_uses_default() {
        let v = parse_value("JWT_EXPIRY_HOURS", None, 24, JWT_EXPIRY_HOURS_RANGE).unwrap();
        assert_eq!(v, 24);
    }

    #[test]
    fn test_valid_value_is_used() {
        let v = parse_value("JWT_EXPIRY_HOURS", Some(" 12 ".into()), 24, JWT_EXPIRY_HOURS_RANGE)
            .unwrap();
        assert_eq!(v, 12);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let err = parse_value("JWT_EXPIRY_HOURS", Some("abc".into()), 24, JWT_EXPIRY_HOURS_RANGE)
            .unwrap_err();
        assert!(err.to_string().contains("JWT_EXPIRY_HOURS"));
    }

    #[test]
    fn test_out_of_range_value_is_an_error() {
        for raw in ["0", "-3", "9223372036854775807"] {
            assert!(
                parse_value("JWT_EXPIRY_HOURS", Some(raw.into()), 24, JWT_EXPIRY_HOURS_RANGE)
                    .is_err(),
                "{raw}"
            );
        }
        assert!(
            parse_value(
                "RESERVATION_TIMEOUT_MS",
                Some("0".into()),
                2000,
                RESERVATION_TIMEOUT_MS_RANGE
            )
            .is_err()
        );
        assert!(parse_value("HTTP_PORT", Some("70000".into()), 3001u16, 0..=u16::MAX).is_err());
    }
}
