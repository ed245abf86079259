//! Repository for the `room_keys` table.
//!
//! The atomic claim of an available key during check-in lives in
//! `custody_repo`; this repo covers the plain reads and the staff-side
//! status overrides (lost/damaged).

use sqlx::PgPool;
use roomkey_core::types::DbId;

use crate::models::key::RoomKey;
use crate::models::status::{KeyStatus, StatusId};

/// Column list for `room_keys` queries.
const COLUMNS: &str = "id, code, room_id, status_id, created_at, updated_at";

/// Read and status-override operations for physical keys.
pub struct KeyRepo;

impl KeyRepo {
    /// List all keys bound to a room, ordered by code.
    pub async fn list_for_room(pool: &PgPool, room_id: DbId) -> Result<Vec<RoomKey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM room_keys WHERE room_id = $1 ORDER BY code ASC"
        );
        sqlx::query_as::<_, RoomKey>(&query)
            .bind(room_id)
            .fetch_all(pool)
            .await
    }

    /// Find a key by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RoomKey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM room_keys WHERE id = $1");
        sqlx::query_as::<_, RoomKey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Override a key's status (lost/damaged bookkeeping, staff desk only).
    /// Returns the updated row, or `None` if the key does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<Option<RoomKey>, sqlx::Error> {
        let query = format!(
            "UPDATE room_keys SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoomKey>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// How many keys for the room are currently available.
    pub async fn count_available(pool: &PgPool, room_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM room_keys WHERE room_id = $1 AND status_id = $2",
        )
        .bind(room_id)
        .bind(KeyStatus::Available.id())
        .fetch_one(pool)
        .await
    }
}
