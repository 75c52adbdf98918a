//! Booking lifecycle over HTTP and at the service boundary

mod common;

use std::time::Duration;

use common::{code, setup, setup_on_disk};
use dine_server::AppState;
use dine_server::services::booking;
use http::StatusCode;
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::BookingCreate;

fn create_request(restaurant_id: i64, table_id: i64) -> BookingCreate {
    BookingCreate {
        restaurant_id,
        table_id,
        date: "2026-11-02".into(),
        time: "19:30".into(),
        party_size: 2,
        special_requests: None,
    }
}

#[tokio::test]
async fn test_double_booking_is_refused() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);
    let bob = app.token(&app.seed.bob);

    let (status, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(app.seed.table_id, 2))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["booking_id"].as_i64().is_some());
    assert_eq!(body["status"], "confirmed");

    let (status, body) = app
        .post("/api/bookings", Some(&bob), app.booking_body(app.seed.table_id, 2))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::TableUnavailable.code() as u64);

    assert_eq!(app.table_status(app.seed.table_id).await, "reserved");
    assert_eq!(app.active_bookings(app.seed.table_id).await, 1);
}

#[tokio::test]
async fn test_concurrent_reservations_have_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_on_disk(&dir, Duration::from_secs(2)).await;
    let claims = app.state.tokens.verify(&app.token(&app.seed.alice)).unwrap();
    let req = create_request(app.seed.restaurant_id, app.seed.table_id);

    let attempts = (0..8).map(|_| {
        let state = app.state.clone();
        let claims = claims.clone();
        let req = req.clone();
        tokio::spawn(async move { booking::create_booking(&state, &claims, &req).await })
    });
    let results: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for result in results.into_iter().filter_map(Result::err) {
        let err: AppError = result.into();
        assert_eq!(err.code, ErrorCode::TableUnavailable);
    }
    assert_eq!(app.table_status(app.seed.table_id).await, "reserved");
    assert_eq!(app.active_bookings(app.seed.table_id).await, 1);
}

#[tokio::test]
async fn test_failed_insert_leaves_table_available() {
    let app = setup().await;
    sqlx::query(
        "CREATE TRIGGER reject_booking BEFORE INSERT ON bookings
         BEGIN SELECT RAISE(ABORT, 'insert rejected'); END",
    )
    .execute(&app.state.pool)
    .await
    .unwrap();

    let alice = app.token(&app.seed.alice);
    let (status, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(app.seed.table_id, 2))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["message"].as_str().unwrap_or_default().contains("rejected"));
    assert_eq!(app.table_status(app.seed.table_id).await, "available");

    sqlx::query("DROP TRIGGER reject_booking")
        .execute(&app.state.pool)
        .await
        .unwrap();
    let (status, _) = app
        .post("/api/bookings", Some(&alice), app.booking_body(app.seed.table_id, 2))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_reservation_deadline_yields_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_on_disk(&dir, Duration::from_millis(200)).await;
    let claims = app.state.tokens.verify(&app.token(&app.seed.alice)).unwrap();
    let req = create_request(app.seed.restaurant_id, app.seed.table_id);

    // Hold the database write lock past the deadline
    let mut blocker = app.state.pool.acquire().await.unwrap();
    sqlx::query("BEGIN IMMEDIATE").execute(&mut *blocker).await.unwrap();

    let err: AppError = booking::create_booking(&app.state, &claims, &req)
        .await
        .unwrap_err()
        .into();
    assert_eq!(err.code, ErrorCode::TimeoutError);
    assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);

    sqlx::query("ROLLBACK").execute(&mut *blocker).await.unwrap();
    drop(blocker);

    assert_eq!(app.table_status(app.seed.table_id).await, "available");
    assert_eq!(app.active_bookings(app.seed.table_id).await, 0);

    let patient = AppState {
        reservation_timeout: Duration::from_secs(5),
        ..app.state.clone()
    };
    booking::create_booking(&patient, &claims, &req).await.unwrap();
    assert_eq!(app.table_status(app.seed.table_id).await, "reserved");
}

#[tokio::test]
async fn test_booking_validation_and_capacity() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);

    let (status, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(app.seed.table_id, 6))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::PartySizeExceedsCapacity.code() as u64);

    let mut bad_date = app.booking_body(app.seed.table_id, 2);
    bad_date["date"] = json!("02/11/2026");
    let (status, body) = app.post("/api/bookings", Some(&alice), bad_date).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::ValidationFailed.code() as u64);

    // Table of another restaurant
    let (status, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(app.seed.other_table_id, 2))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), ErrorCode::TableNotFound.code() as u64);

    assert_eq!(app.table_status(app.seed.table_id).await, "available");
    assert_eq!(app.table_status(app.seed.other_table_id).await, "available");
}

#[tokio::test]
async fn test_single_digit_hour_is_stored_padded() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);

    let mut body = app.booking_body(app.seed.table_id, 2);
    body["time"] = json!("7:30");
    let (status, body) = app.post("/api/bookings", Some(&alice), body).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["time"], "07:30");

    let id = body["booking_id"].as_i64().unwrap();
    let (status, body) = app.get(&format!("/api/bookings/{id}"), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["time"], "07:30");
}

#[tokio::test]
async fn test_booking_requires_customer() {
    let app = setup().await;

    let (status, body) = app
        .post("/api/bookings", None, app.booking_body(app.seed.table_id, 2))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code(&body), ErrorCode::NotAuthenticated.code() as u64);

    for principal in [&app.seed.admin, &app.seed.owner] {
        let token = app.token(principal);
        let (status, body) = app
            .post("/api/bookings", Some(&token), app.booking_body(app.seed.table_id, 2))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code(&body), ErrorCode::RoleRequired.code() as u64);
    }
    assert_eq!(app.table_status(app.seed.table_id).await, "available");
}

#[tokio::test]
async fn test_cancel_releases_table() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);
    let bob = app.token(&app.seed.bob);

    let (_, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(app.seed.table_id, 2))
        .await;
    let id = body["booking_id"].as_i64().unwrap();

    // Not the owner: indistinguishable from a missing booking
    let (status, _) = app
        .put(&format!("/api/bookings/{id}/cancel"), Some(&bob), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.table_status(app.seed.table_id).await, "reserved");

    let (status, body) = app
        .put(&format!("/api/bookings/{id}/cancel"), Some(&alice), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["restaurant_name"], "Trattoria");
    assert_eq!(app.table_status(app.seed.table_id).await, "available");

    let (status, body) = app
        .put(&format!("/api/bookings/{id}/cancel"), Some(&alice), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::BookingNotCancellable.code() as u64);

    // Released table can be booked again
    let (status, _) = app
        .post("/api/bookings", Some(&bob), app.booking_body(app.seed.table_id, 2))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_own_bookings_only() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);
    let bob = app.token(&app.seed.bob);

    let (_, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(app.seed.table_id, 3))
        .await;
    let id = body["booking_id"].as_i64().unwrap();

    let (status, body) = app.get("/api/bookings", Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["table_number"], 5);
    assert_eq!(body[0]["party_size"], 3);

    let (status, body) = app.get("/api/bookings", Some(&bob)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app.get(&format!("/api/bookings/{id}"), Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get(&format!("/api/bookings/{id}"), Some(&bob)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(code(&body), ErrorCode::BookingNotFound.code() as u64);
}

#[tokio::test]
async fn test_admin_of_other_restaurant_is_forbidden() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);
    let intruder = app.token(&app.seed.other_admin);
    let rid = app.seed.restaurant_id;
    let tid = app.seed.table_id;

    app.post("/api/bookings", Some(&alice), app.booking_body(tid, 2))
        .await;

    let (status, body) = app
        .put(
            &format!("/api/admin/restaurants/{rid}/tables/{tid}/status"),
            Some(&intruder),
            json!({ "status": "available" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), ErrorCode::RestaurantMismatch.code() as u64);

    let (status, _) = app
        .get(&format!("/api/admin/restaurants/{rid}/bookings"), Some(&intruder))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.table_status(tid).await, "reserved");
    assert_eq!(app.active_bookings(tid).await, 1);
}

#[tokio::test]
async fn test_customer_cannot_use_admin_routes() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);
    let rid = app.seed.restaurant_id;

    let (status, body) = app
        .post(
            &format!("/api/admin/restaurants/{rid}/tables"),
            Some(&alice),
            json!({ "table_number": 9, "seat_capacity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), ErrorCode::RoleRequired.code() as u64);
}

#[tokio::test]
async fn test_seating_completes_booking() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);
    let admin = app.token(&app.seed.admin);
    let rid = app.seed.restaurant_id;
    let tid = app.seed.table_id;
    let status_uri = format!("/api/admin/restaurants/{rid}/tables/{tid}/status");

    let (_, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(tid, 2))
        .await;
    let id = body["booking_id"].as_i64().unwrap();

    let (status, body) = app
        .get(&format!("/api/admin/restaurants/{rid}/bookings"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], id);

    // Reserving is only possible through a booking
    let (status, body) = app
        .put(&status_uri, Some(&admin), json!({ "status": "reserved" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(code(&body), ErrorCode::TableInvalidTransition.code() as u64);

    let (status, body) = app
        .put(&status_uri, Some(&admin), json!({ "status": "occupied" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "occupied");

    let (_, body) = app.get(&format!("/api/bookings/{id}"), Some(&alice)).await;
    assert_eq!(body["status"], "completed");

    // occupied -> available skips cleaning
    let (status, _) = app
        .put(&status_uri, Some(&admin), json!({ "status": "available" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for next in ["cleaning", "available"] {
        let (status, _) = app.put(&status_uri, Some(&admin), json!({ "status": next })).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = app
        .post("/api/bookings", Some(&alice), app.booking_body(tid, 2))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_release_cancels_booking() {
    let app = setup().await;
    let alice = app.token(&app.seed.alice);
    let admin = app.token(&app.seed.admin);
    let rid = app.seed.restaurant_id;
    let tid = app.seed.table_id;

    let (_, body) = app
        .post("/api/bookings", Some(&alice), app.booking_body(tid, 2))
        .await;
    let id = body["booking_id"].as_i64().unwrap();

    let (status, _) = app
        .put(
            &format!("/api/admin/restaurants/{rid}/tables/{tid}/status"),
            Some(&admin),
            json!({ "status": "available" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.active_bookings(tid).await, 0);

    let (_, body) = app.get(&format!("/api/bookings/{id}"), Some(&alice)).await;
    assert_eq!(body["status"], "cancelled");
}
