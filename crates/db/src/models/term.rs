//! Academic term model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use roomkey_core::types::{DbId, Timestamp};

/// A row from the `terms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Term {
    pub id: DbId,
    pub name: String,
    pub year: i32,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
