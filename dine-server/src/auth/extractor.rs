//! Session extractor
//!
//! Validates the bearer token and re-checks the principal's status in the
//! database, so disabling an account takes effect on its next request even
//! though tokens are never revoked.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use crate::auth::token::{SessionClaims, TokenError, TokenService};
use crate::db::principals;
use crate::security_log;
use crate::state::AppState;

impl FromRequestParts<AppState> for SessionClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(claims.clone());
        }

        let token = match parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        {
            Some(header) => TokenService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("WARN", "auth_missing", uri = parts.uri.path().to_string());
                return Err(AppError::not_authenticated());
            }
        };

        let claims = state.tokens.verify(token).map_err(|e| {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = parts.uri.path().to_string()
            );
            match e {
                TokenError::Expired => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            }
        })?;

        let status = principals::find_status(&state.pool, claims.kind, claims.principal_id)
            .await
            .map_err(|e| {
                tracing::error!("Principal status lookup failed: {e}");
                AppError::database("Failed to verify session")
            })?;

        let active = status.is_some_and(|s| {
            s.status.is_active() && s.restaurant_id == claims.restaurant_id
        });
        if !active {
            security_log!(
                "WARN",
                "auth_inactive_principal",
                principal_id = claims.principal_id,
                kind = claims.kind.as_str()
            );
            return Err(AppError::invalid_token("Account is no longer active"));
        }

        parts.extensions.insert(claims.clone());
        Ok(claims)
    }
}
