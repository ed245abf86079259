//! Repository for the `sections` table.
//!
//! Sections are read-only here: the engine only projects them onto concrete
//! dates for availability and the day grid.

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use roomkey_core::types::DbId;

use crate::models::section::SectionMeeting;

/// Read access to recurring class sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Class meetings occupying `room_id` on `date`: sections whose ISO
    /// weekday matches, that are active, and whose term is active and
    /// covers the date.
    pub async fn meetings_on(
        pool: &PgPool,
        room_id: DbId,
        date: NaiveDate,
    ) -> Result<Vec<SectionMeeting>, sqlx::Error> {
        let weekday = date.weekday().number_from_monday() as i16;
        sqlx::query_as::<_, SectionMeeting>(
            "SELECT s.id AS section_id, s.course_code, s.course_title, s.starts_at, s.ends_at
             FROM sections s
             JOIN terms t ON t.id = s.term_id
             WHERE s.room_id = $1
               AND s.weekday = $2
               AND s.is_active
               AND t.is_active
               AND $3 BETWEEN t.starts_on AND t.ends_on
             ORDER BY s.starts_at ASC",
        )
        .bind(room_id)
        .bind(weekday)
        .bind(date)
        .fetch_all(pool)
        .await
    }
}
