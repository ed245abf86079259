//! Shared seed helpers for repository integration tests.
//!
//! These insert directly with SQL so each test controls exactly the rows it
//! needs, including states the public API would refuse to create.

use chrono::NaiveDate;
use sqlx::PgPool;
use roomkey_core::types::{DbId, Timestamp};
use roomkey_db::models::status::StatusId;

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

pub async fn add_participant(pool: &PgPool, reservation_id: DbId, user_id: DbId) {
    sqlx::query("INSERT INTO reservation_participants (reservation_id, user_id) VALUES ($1, $2)")
        .bind(reservation_id)
        .bind(user_id)
        .execute(pool)
        .await
        .expect("seed participant");
}

pub async fn seed_term(
    pool: &PgPool,
    name: &str,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
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

#[allow(clippy::too_many_arguments)]
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
