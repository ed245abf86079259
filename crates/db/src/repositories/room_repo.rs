//! Repository for the `rooms` table.

use sqlx::PgPool;
use roomkey_core::types::DbId;

use crate::models::room::Room;

/// Column list for `rooms` queries.
const COLUMNS: &str = "id, code, name, floor, capacity, is_active, created_at, updated_at";

/// Read access to the room directory.
pub struct RoomRepo;

impl RoomRepo {
    /// List all active rooms, ordered by code.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE is_active ORDER BY code ASC");
        sqlx::query_as::<_, Room>(&query).fetch_all(pool).await
    }

    /// Find a room by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
