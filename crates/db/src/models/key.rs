//! Physical key model.

use serde::Serialize;
use sqlx::FromRow;
use roomkey_core::types::{DbId, Timestamp};

use super::status::StatusId;

/// A row from the `room_keys` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoomKey {
    pub id: DbId,
    pub code: String,
    pub room_id: DbId,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
