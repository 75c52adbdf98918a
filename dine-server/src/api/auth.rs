//! Authentication routes
//!
//! - POST /api/auth/signup            customer registration
//! - POST /api/auth/login             customer login
//! - POST /api/auth/admin-login       restaurant admin login (admin code)
//! - POST /api/auth/superadmin-login  super admin login (plus security code)

use axum::{Json, Router, extract::State, middleware, routing::post};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Principal, PrincipalKind, PrincipalProfile, Restaurant};

use super::ApiResult;
use crate::auth::credentials::{self, Registration};
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::db::{principals, restaurants};
use crate::error::ServiceError;
use crate::security_log;
use crate::state::AppState;
use crate::util::secure_compare;

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 50;

pub fn router(state: &AppState) -> Router<AppState> {
    let login = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/admin-login", post(admin_login))
        .route("/api/auth/superadmin-login", post(superadmin_login))
        .layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    let signup = Router::new()
        .route("/api/auth/signup", post(signup))
        .layer(middleware::from_fn_with_state(state.clone(), register_rate_limit));

    Router::new().merge(login).merge(signup)
}

// ── Request / Response types ──

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    #[serde(default, alias = "mobile")]
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub id: i64,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub principal: PrincipalProfile,
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    #[serde(alias = "adminId")]
    pub admin_id: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub principal: PrincipalProfile,
    pub restaurant: Restaurant,
}

#[derive(Deserialize)]
pub struct SuperadminLoginRequest {
    pub email: String,
    pub password: String,
    #[serde(alias = "securityCode")]
    pub security_code: String,
}

#[derive(Serialize)]
pub struct SuperadminLoginResponse {
    pub token: String,
    pub principal: PrincipalProfile,
}

// ── Helpers ──

fn validate_signup(req: &SignupRequest) -> Result<(), AppError> {
    let name_len = req.name.trim().chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name_len) {
        return Err(AppError::validation(format!(
            "Name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
        ))
        .with_detail("field", "name"));
    }
    let email = req.email.trim();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(
            AppError::validation("Please provide a valid email").with_detail("field", "email")
        );
    }
    if let Some(phone) = req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        let digits = phone.trim_start_matches('+');
        if digits.len() < 7 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Please provide a valid phone number")
                .with_detail("field", "phone"));
        }
    }
    Ok(())
}

fn issue_token(state: &AppState, principal: &Principal) -> Result<String, AppError> {
    state.tokens.issue(principal).map_err(|e| {
        tracing::error!("Token generation failed: {e}");
        AppError::internal("Failed to generate token")
    })
}

async fn load_profile(state: &AppState, principal: &Principal) -> Result<PrincipalProfile, AppError> {
    principals::get_profile(&state.pool, principal.kind, principal.id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| AppError::internal("Principal profile missing"))
}

async fn authenticate(
    state: &AppState,
    kind: PrincipalKind,
    identity: &str,
    secret: &str,
) -> Result<Principal, AppError> {
    credentials::verify(&state.pool, kind, identity, secret)
        .await
        .map_err(|e| {
            security_log!(
                "WARN",
                "login_failed",
                kind = kind.as_str(),
                identity = identity.to_string()
            );
            ServiceError::from(e).into()
        })
}

// ── Handlers ──

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<SignupResponse> {
    validate_signup(&req)?;

    let mut conn = state.pool.acquire().await.map_err(ServiceError::from)?;
    let id = credentials::register(
        &mut conn,
        Registration {
            kind: PrincipalKind::Customer,
            identity: &req.email,
            secret: &req.password,
            name: req.name.trim(),
            phone: req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            restaurant_id: None,
        },
    )
    .await
    .map_err(ServiceError::from)?;

    tracing::info!(customer_id = id, "Customer registered");
    Ok(Json(SignupResponse { id }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let principal = authenticate(&state, PrincipalKind::Customer, &req.email, &req.password).await?;
    let token = issue_token(&state, &principal)?;
    let profile = load_profile(&state, &principal).await?;

    security_log!("INFO", "login_success", principal_id = principal.id, kind = "customer");
    Ok(Json(LoginResponse {
        token,
        principal: profile,
    }))
}

/// POST /api/auth/admin-login
pub async fn admin_login(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> ApiResult<AdminLoginResponse> {
    let principal = authenticate(
        &state,
        PrincipalKind::RestaurantAdmin,
        &req.admin_id,
        &req.password,
    )
    .await?;

    // Admins of a deactivated restaurant cannot sign in
    let restaurant_id = principal
        .restaurant_id
        .ok_or_else(|| AppError::internal("Restaurant admin without restaurant"))?;
    let restaurant = restaurants::find_active(&state.pool, restaurant_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| {
            security_log!(
                "WARN",
                "login_inactive_restaurant",
                principal_id = principal.id,
                restaurant_id = restaurant_id
            );
            AppError::invalid_credentials()
        })?;

    let token = issue_token(&state, &principal)?;
    let profile = load_profile(&state, &principal).await?;

    security_log!(
        "INFO",
        "login_success",
        principal_id = principal.id,
        kind = "restaurant_admin"
    );
    Ok(Json(AdminLoginResponse {
        token,
        principal: profile,
        restaurant,
    }))
}

/// POST /api/auth/superadmin-login
pub async fn superadmin_login(
    State(state): State<AppState>,
    Json(req): Json<SuperadminLoginRequest>,
) -> ApiResult<SuperadminLoginResponse> {
    // Security code is checked after the password; both fail the same way
    let principal = authenticate(&state, PrincipalKind::Superadmin, &req.email, &req.password).await?;

    if !secure_compare(&req.security_code, &state.superadmin_security_code) {
        security_log!(
            "WARN",
            "login_failed",
            kind = "superadmin",
            reason = "security_code"
        );
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }

    let token = issue_token(&state, &principal)?;
    let profile = load_profile(&state, &principal).await?;

    security_log!("INFO", "login_success", principal_id = principal.id, kind = "superadmin");
    Ok(Json(SuperadminLoginResponse {
        token,
        principal: profile,
    }))
}
