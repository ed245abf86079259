//! Bookable room model.

use serde::Serialize;
use sqlx::FromRow;
use roomkey_core::types::{DbId, Timestamp};

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub floor: i32,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
