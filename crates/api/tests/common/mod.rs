//! Shared helpers for HTTP-level integration tests.
//!
//! [`build_test_app`] constructs the exact production router via
//! [`roomkey_api::router::build_app_router`], with fixed token secrets so
//! tests can mint credentials without touching the environment.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use roomkey_api::auth::jwt::{self, JwtConfig};
use roomkey_api::auth::qr::{self, QrTokenConfig};
use roomkey_api::config::ServerConfig;
use roomkey_api::router::build_app_router;
use roomkey_api::state::AppState;
use roomkey_core::types::{DbId, Timestamp};
use roomkey_db::models::status::StatusId;

pub const KIOSK_KEY: &str = "kiosk-test-key";

/// Build a test `ServerConfig` with safe defaults and fixed secrets.
///
/// Timezone offset is 0 so civil dates and UTC dates coincide in tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "jwt-secret-for-tests".to_string(),
            access_token_expiry_mins: 60,
        },
        qr: QrTokenConfig {
            secret: "qr-secret-for-tests".to_string(),
            expiry_secs: 300,
        },
        kiosk_api_keys: vec![KIOSK_KEY.to_string()],
        timezone_offset_minutes: 0,
        booking_window_days: 30,
        sweep_interval_secs: 300,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the production stack exactly.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Mint a Bearer token for the given user and role.
pub fn bearer_for(user_id: DbId, role: &str) -> String {
    let token = jwt::generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

/// Mint a scanner (QR) identity token for the given user.
pub fn qr_token_for(user_id: DbId) -> String {
    qr::mint(user_id, &test_config().qr).expect("QR token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, path: &str, auth: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = builder.body(Body::empty()).expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn post_json(
    app: Router,
    path: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// POST to a kiosk route with the test device key.
pub async fn post_kiosk(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .header("x-kiosk-key", KIOSK_KEY)
        .body(Body::from(body.to_string()))
        .expect("request");
    app.oneshot(request).await.expect("response")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert the response is an error with the given status and `code` field.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
}

// ---------------------------------------------------------------------------
// Seed helpers (direct SQL, so tests control exact database states)
// ---------------------------------------------------------------------------

pub async fn seed_user(pool: &PgPool, username: &str, role: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (username, display_name, role) VALUES ($1, $1, $2) RETURNING id",
    )
    .bind(username)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("seed user")
}

pub async fn seed_room(pool: &PgPool, code: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO rooms (code, name) VALUES ($1, $1) RETURNING id")
        .bind(code)
        .fetch_one(pool)
        .await
        .expect("seed room")
}

pub async fn seed_key(pool: &PgPool, room_id: DbId, code: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO room_keys (code, room_id) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(room_id)
        .fetch_one(pool)
        .await
        .expect("seed key")
}

/// Insert a reservation row directly in the given status.
pub async fn seed_reservation(
    pool: &PgPool,
    room_id: DbId,
    requester_id: DbId,
    status_id: StatusId,
    starts_at: Timestamp,
    ends_at: Timestamp,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO reservations
            (room_id, requester_id, slot_label, starts_at, ends_at, status_id)
         VALUES ($1, $2, 'test', $3, $4, $5)
         RETURNING id",
    )
    .bind(room_id)
    .bind(requester_id)
    .bind(starts_at)
    .bind(ends_at)
    .bind(status_id)
    .fetch_one(pool)
    .await
    .expect("seed reservation")
}

pub async fn seed_term(
    pool: &PgPool,
    name: &str,
    starts_on: chrono::NaiveDate,
    ends_on: chrono::NaiveDate,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO terms (name, year, starts_on, ends_on)
         VALUES ($1, 2025, $2, $3)
         RETURNING id",
    )
    .bind(name)
    .bind(starts_on)
    .bind(ends_on)
    .fetch_one(pool)
    .await
    .expect("seed term")
}

pub async fn seed_section(
    pool: &PgPool,
    room_id: DbId,
    teacher_id: DbId,
    term_id: DbId,
    weekday: i16,
    starts_at: &str,
    ends_at: &str,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO sections
            (course_code, course_title, teacher_id, room_id, weekday, starts_at, ends_at, term_id)
         VALUES ('CS101', 'Intro', $1, $2, $3, $4::TIME, $5::TIME, $6)
         RETURNING id",
    )
    .bind(teacher_id)
    .bind(room_id)
    .bind(weekday)
    .bind(starts_at)
    .bind(ends_at)
    .bind(term_id)
    .fetch_one(pool)
    .await
    .expect("seed section")
}

/// Current status id of a reservation.
pub async fn reservation_status(pool: &PgPool, id: DbId) -> StatusId {
    sqlx::query_scalar("SELECT status_id FROM reservations WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("reservation status")
}

/// Current status id of a key.
pub async fn key_status(pool: &PgPool, id: DbId) -> StatusId {
    sqlx::query_scalar("SELECT status_id FROM room_keys WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("key status")
}
