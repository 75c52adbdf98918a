//! Shared fixtures for the HTTP-level tests
#![allow(dead_code)]

use std::sync::OnceLock;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use dine_server::db::{self, principals, restaurants, tables};
use dine_server::{AppState, Config, create_router};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{Principal, PrincipalKind, PrincipalStatus};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Password of every seeded account
pub const PASSWORD: &str = "Passw0rd";
pub const SECURITY_CODE: &str = "777888";

pub struct Seed {
    pub restaurant_id: i64,
    pub other_restaurant_id: i64,
    /// Table #5 of the first restaurant, 4 seats
    pub table_id: i64,
    /// Table #1 of the second restaurant, 2 seats
    pub other_table_id: i64,
    pub alice: Principal,
    pub bob: Principal,
    pub admin: Principal,
    pub other_admin: Principal,
    pub owner: Principal,
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub seed: Seed,
}

// Hashing is slow in debug builds; all seeded accounts share one hash
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| dine_server::util::hash_password(PASSWORD).unwrap())
}

fn principal(id: i64, kind: PrincipalKind, restaurant_id: Option<i64>) -> Principal {
    Principal {
        id,
        kind,
        restaurant_id,
        status: PrincipalStatus::Active,
    }
}

pub async fn seed(pool: &SqlitePool) -> Seed {
    let hash = password_hash();
    let mut conn = pool.acquire().await.unwrap();

    let rid = restaurants::create(&mut conn, "Trattoria", "Italian", None, None, None, 0)
        .await
        .unwrap();
    let other_rid = restaurants::create(&mut conn, "Sushi Bar", "Japanese", None, None, None, 0)
        .await
        .unwrap();

    let alice = principals::insert_customer(&mut conn, "Alice", "alice@example.com", None, hash, 0)
        .await
        .unwrap();
    let bob = principals::insert_customer(&mut conn, "Bob", "bob@example.com", None, hash, 0)
        .await
        .unwrap();
    let admin = principals::insert_restaurant_admin(&mut conn, rid, "TRAT-ADMIN", "Trat Admin", hash, 0)
        .await
        .unwrap();
    let other_admin =
        principals::insert_restaurant_admin(&mut conn, other_rid, "SUSHI-ADMIN", "Sushi Admin", hash, 0)
            .await
            .unwrap();
    let owner = principals::insert_superadmin(&mut conn, "Owner", "owner@example.com", hash, 0)
        .await
        .unwrap();
    drop(conn);

    let table = tables::create(pool, rid, 5, 4, 0).await.unwrap();
    let other_table = tables::create(pool, other_rid, 1, 2, 0).await.unwrap();

    Seed {
        restaurant_id: rid,
        other_restaurant_id: other_rid,
        table_id: table.id,
        other_table_id: other_table.id,
        alice: principal(alice, PrincipalKind::Customer, None),
        bob: principal(bob, PrincipalKind::Customer, None),
        admin: principal(admin, PrincipalKind::RestaurantAdmin, Some(rid)),
        other_admin: principal(other_admin, PrincipalKind::RestaurantAdmin, Some(other_rid)),
        owner: principal(owner, PrincipalKind::Superadmin, None),
    }
}

fn build(pool: SqlitePool, config: &Config) -> AppState {
    AppState::with_pool(pool, config)
}

/// In-memory database, seeded
pub async fn setup() -> TestApp {
    let config = Config::development("sqlite::memory:");
    let pool = db::connect_in_memory().await.unwrap();
    let seed = seed(&pool).await;
    let state = build(pool, &config);
    TestApp {
        router: create_router(state.clone()),
        state,
        seed,
    }
}

/// On-disk WAL database in `dir`, seeded
pub async fn setup_on_disk(dir: &tempfile::TempDir, reservation_timeout: Duration) -> TestApp {
    let path = dir.path().join("dine.db");
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let mut config = Config::development(url.clone());
    config.reservation_timeout = reservation_timeout;

    let pool = db::connect(&url, Duration::from_secs(5)).await.unwrap();
    let seed = seed(&pool).await;
    let state = build(pool, &config);
    TestApp {
        router: create_router(state.clone()),
        state,
        seed,
    }
}

impl TestApp {
    pub fn token(&self, principal: &Principal) -> String {
        self.state.tokens.issue(principal).unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn table_status(&self, table_id: i64) -> String {
        tables::status_of(&self.state.pool, table_id)
            .await
            .unwrap()
            .unwrap()
            .as_str()
            .to_string()
    }

    pub async fn active_bookings(&self, table_id: i64) -> i64 {
        dine_server::db::bookings::count_active_for_table(&self.state.pool, table_id)
            .await
            .unwrap()
    }

    pub fn booking_body(&self, table_id: i64, party_size: i64) -> Value {
        serde_json::json!({
            "restaurant_id": self.seed.restaurant_id,
            "table_id": table_id,
            "date": "2026-11-02",
            "time": "19:30",
            "party_size": party_size,
        })
    }
}

pub fn code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}
