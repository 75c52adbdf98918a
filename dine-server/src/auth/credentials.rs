//! Credential store
//!
//! Argon2id hashes for the three principal kinds. Verification goes through
//! the same code path whether or not the identity exists, and every failure
//! (unknown identity, wrong secret, disabled account) is the same
//! [`CredentialError::AuthFailure`].

use shared::error::{AppError, ErrorCode};
use shared::models::{Principal, PrincipalKind};
use sqlx::{SqliteConnection, SqlitePool};
use thiserror::Error;

use crate::db::principals;
use crate::error::ServiceError;
use crate::util::{hash_password, verify_dummy_password, verify_password};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("identity already registered")]
    DuplicateIdentity,

    #[error("invalid credentials")]
    AuthFailure,

    #[error("{0}")]
    WeakSecret(String),

    #[error("restaurant admin requires a restaurant")]
    MissingRestaurant,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<CredentialError> for ServiceError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::DuplicateIdentity => {
                AppError::with_message(ErrorCode::AlreadyExists, "Account already exists").into()
            }
            CredentialError::AuthFailure => AppError::invalid_credentials().into(),
            CredentialError::WeakSecret(msg) => {
                AppError::with_message(ErrorCode::PasswordTooShort, msg).into()
            }
            CredentialError::MissingRestaurant => {
                AppError::with_message(ErrorCode::RequiredField, "Restaurant is required").into()
            }
            CredentialError::Hash(msg) => ServiceError::Db(msg.into()),
            CredentialError::Db(e) => e.into(),
        }
    }
}

/// A new principal to store
pub struct Registration<'a> {
    pub kind: PrincipalKind,
    /// Email (customer, super admin) or admin code (restaurant admin)
    pub identity: &'a str,
    pub secret: &'a str,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    /// Required for restaurant admins
    pub restaurant_id: Option<i64>,
}

/// Canonical form of a login identity
pub fn normalize_identity(kind: PrincipalKind, identity: &str) -> String {
    match kind {
        PrincipalKind::RestaurantAdmin => identity.trim().to_string(),
        PrincipalKind::Customer | PrincipalKind::Superadmin => identity.trim().to_lowercase(),
    }
}

/// Password policy: minimum length plus lower, upper and digit classes
pub fn check_password_policy(secret: &str) -> Result<(), CredentialError> {
    if secret.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::WeakSecret(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    let lower = secret.chars().any(|c| c.is_ascii_lowercase());
    let upper = secret.chars().any(|c| c.is_ascii_uppercase());
    let digit = secret.chars().any(|c| c.is_ascii_digit());
    if !(lower && upper && digit) {
        return Err(CredentialError::WeakSecret(
            "Password must contain at least one lowercase letter, one uppercase letter, and one number"
                .into(),
        ));
    }
    Ok(())
}

/// Store a new principal's hashed secret, returning its id.
///
/// Runs on a caller-supplied connection so restaurant creation can register
/// the admin in the same transaction.
pub async fn register(
    conn: &mut SqliteConnection,
    reg: Registration<'_>,
) -> Result<i64, CredentialError> {
    let identity = normalize_identity(reg.kind, reg.identity);
    check_password_policy(reg.secret)?;

    if principals::identity_exists(conn, reg.kind, &identity).await? {
        return Err(CredentialError::DuplicateIdentity);
    }

    let hash = hash_password(reg.secret).map_err(|e| CredentialError::Hash(e.to_string()))?;
    let now = shared::util::now_millis();

    let inserted = match reg.kind {
        PrincipalKind::Customer => {
            principals::insert_customer(conn, reg.name, &identity, reg.phone, &hash, now).await
        }
        PrincipalKind::RestaurantAdmin => {
            let restaurant_id = reg
                .restaurant_id
                .ok_or(CredentialError::MissingRestaurant)?;
            principals::insert_restaurant_admin(conn, restaurant_id, &identity, reg.name, &hash, now)
                .await
        }
        PrincipalKind::Superadmin => {
            principals::insert_superadmin(conn, reg.name, &identity, &hash, now).await
        }
    };

    match inserted {
        Ok(id) => Ok(id),
        // Lost a race with a concurrent registration of the same identity
        Err(e) if crate::error::is_unique_violation(&e) => Err(CredentialError::DuplicateIdentity),
        Err(e) => Err(e.into()),
    }
}

/// Check a login secret and return the authenticated principal
pub async fn verify(
    pool: &SqlitePool,
    kind: PrincipalKind,
    identity: &str,
    secret: &str,
) -> Result<Principal, CredentialError> {
    let identity = normalize_identity(kind, identity);
    let Some(row) = principals::find_credential(pool, kind, &identity).await? else {
        verify_dummy_password(secret);
        return Err(CredentialError::AuthFailure);
    };

    if !verify_password(secret, &row.password_hash) {
        return Err(CredentialError::AuthFailure);
    }
    if !row.status.is_active() {
        return Err(CredentialError::AuthFailure);
    }

    Ok(Principal {
        id: row.id,
        kind,
        restaurant_id: row.restaurant_id,
        status: row.status,
    })
}
