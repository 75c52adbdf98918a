//! Session token service
//!
//! Issues and verifies HS256 JWTs carrying the principal's id, kind and (for
//! restaurant admins) restaurant. Verification fails closed: anything that
//! is not a well-formed, correctly signed, unexpired token for this issuer
//! and audience is rejected. There is no refresh or server-side revocation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::{Principal, PrincipalKind};
use thiserror::Error;

use crate::config::Config;

/// Token service configuration
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expiry_hours: i64,
    pub issuer: String,
    pub audience: String,
}

impl From<&Config> for TokenConfig {
    fn from(config: &Config) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiry_hours: config.jwt_expiry_hours,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
        }
    }
}

/// Wire format of the JWT payload
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    /// Principal ID
    sub: String,
    kind: PrincipalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    restaurant_id: Option<i64>,
    /// Issued at (Unix timestamp seconds)
    iat: i64,
    /// Expiration (Unix timestamp seconds)
    exp: i64,
    iss: String,
    aud: String,
}

/// Verified contents of a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub principal_id: i64,
    pub kind: PrincipalKind,
    pub restaurant_id: Option<i64>,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl SessionClaims {
    pub fn is_customer(&self) -> bool {
        self.kind == PrincipalKind::Customer
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token generation failed: {0}")]
    Generation(String),
}

#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for an authenticated principal
    pub fn issue(&self, principal: &Principal) -> Result<String, TokenError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`
    pub fn issue_at(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        check_scope(principal.kind, principal.restaurant_id)
            .map_err(|e| TokenError::Generation(e.to_string()))?;

        let expires_at = Duration::try_hours(self.config.expiry_hours)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                TokenError::Generation(format!(
                    "Token lifetime of {} hours is out of range",
                    self.config.expiry_hours
                ))
            })?;
        let claims = JwtClaims {
            sub: principal.id.to_string(),
            kind: principal.kind,
            restaurant_id: principal.restaurant_id,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify signature, expiry, issuer and audience, then decode the claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);
        validation.leeway = 0;

        let data = decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;
        let claims = data.claims;

        let principal_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| TokenError::Invalid("malformed subject".into()))?;
        check_scope(claims.kind, claims.restaurant_id)?;

        Ok(SessionClaims {
            principal_id,
            kind: claims.kind,
            restaurant_id: claims.restaurant_id,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }

    /// Extract the token from an `Authorization: Bearer <token>` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Restaurant admins carry exactly one restaurant; other kinds carry none.
fn check_scope(kind: PrincipalKind, restaurant_id: Option<i64>) -> Result<(), TokenError> {
    match (kind, restaurant_id) {
        (PrincipalKind::RestaurantAdmin, Some(_)) => Ok(()),
        (PrincipalKind::RestaurantAdmin, None) => {
            Err(TokenError::Invalid("restaurant admin without restaurant".into()))
        }
        (_, Some(_)) => Err(TokenError::Invalid(format!("{kind} with restaurant scope"))),
        (_, None) => Ok(()),
    }
}
