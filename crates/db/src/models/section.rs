//! Recurring class-section models.

use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;
use roomkey_core::types::{DbId, Timestamp};

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub course_code: String,
    pub course_title: String,
    pub teacher_id: DbId,
    pub room_id: DbId,
    /// ISO weekday: 1 = Monday .. 7 = Sunday.
    pub weekday: i16,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub term_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A section meeting projected onto a concrete date: the subset of section
/// fields the availability calculator and day grid need.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SectionMeeting {
    pub section_id: DbId,
    pub course_code: String,
    pub course_title: String,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}
