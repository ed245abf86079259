//! Reservation models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use roomkey_core::types::{DbId, Timestamp};

use super::status::StatusId;

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub room_id: DbId,
    pub requester_id: DbId,
    pub slot_label: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub note: Option<String>,
    pub status_id: StatusId,
    pub approver_id: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fully validated insert input for a new reservation.
///
/// Built by the API layer after slot/date/participant validation; the
/// repository re-checks the occupancy conflict inside its transaction.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub room_id: DbId,
    pub requester_id: DbId,
    pub slot_label: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub note: Option<String>,
    pub status_id: StatusId,
    pub participant_ids: Vec<DbId>,
}

/// Decision on a pending reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionAction {
    Approve,
    Reject,
}

/// One occupant row in the day grid: either a stored ad-hoc reservation or
/// a materialized (never persisted) class meeting.
#[derive(Debug, Clone, Serialize)]
pub struct DayOccupant {
    /// `"RESERVATION"` or `"IN_CLASS"`.
    pub kind: &'static str,
    /// Reservation id for stored rows; `None` for materialized class rows.
    pub reservation_id: Option<DbId>,
    pub label: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    /// Status name of the stored row; class rows are always `"in_class"`.
    pub status: &'static str,
}

/// Compact reservation view returned by kiosk lookup.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReservationSummary {
    pub id: DbId,
    pub room_id: DbId,
    pub room_code: String,
    pub slot_label: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status_id: StatusId,
}
