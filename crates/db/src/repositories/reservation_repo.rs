//! Repository for the `reservations` table and its participant links.
//!
//! The mutating operations here are the engine's transactional contracts:
//! booking re-checks occupancy under a room row lock, decisions and
//! cancellations are conditional updates, and the no-show sweep is a single
//! idempotent statement.

use sqlx::PgPool;
use roomkey_core::error::BookingError;
use roomkey_core::statemachine::{state_machine, within_cancel_cutoff};
use roomkey_core::types::{DbId, Timestamp};

use crate::error::RepoError;
use crate::models::reservation::{
    CreateReservation, DecisionAction, Reservation, ReservationSummary,
};
use crate::models::status::{ReservationStatus, StatusId, OCCUPYING_STATUSES};

/// Column list for `reservations` queries.
const COLUMNS: &str = "\
    id, room_id, requester_id, slot_label, starts_at, ends_at, note, \
    status_id, approver_id, decided_at, created_at, updated_at";

/// Page size for per-user reservation listings.
const LIST_LIMIT: i64 = 50;

/// CRUD and state transitions for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a validated reservation, re-checking room occupancy inside
    /// the transaction.
    ///
    /// The room row is locked `FOR UPDATE` first so two concurrent bookings
    /// for the same room serialize; the loser re-evaluates the overlap query
    /// against the winner's committed row and fails with
    /// `ROOM_ALREADY_RESERVED`. Participant existence is also re-checked
    /// here so the insert and its links commit or fail together.
    pub async fn create_booked(
        pool: &PgPool,
        input: &CreateReservation,
    ) -> Result<Reservation, RepoError> {
        let mut tx = pool.begin().await?;

        let room: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM rooms WHERE id = $1 AND is_active FOR UPDATE")
                .bind(input.room_id)
                .fetch_optional(&mut *tx)
                .await?;
        if room.is_none() {
            return Err(BookingError::NotFound { entity: "Room" }.into());
        }

        let conflicts: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations
             WHERE room_id = $1
               AND status_id = ANY($2)
               AND starts_at < $4
               AND ends_at > $3",
        )
        .bind(input.room_id)
        .bind(&OCCUPYING_STATUSES[..])
        .bind(input.starts_at)
        .bind(input.ends_at)
        .fetch_one(&mut *tx)
        .await?;
        if conflicts > 0 {
            return Err(BookingError::RoomAlreadyReserved.into());
        }

        if !input.participant_ids.is_empty() {
            let active: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM users WHERE id = ANY($1) AND is_active",
            )
            .bind(&input.participant_ids)
            .fetch_one(&mut *tx)
            .await?;
            if active != input.participant_ids.len() as i64 {
                return Err(BookingError::InvalidParticipants(
                    "one or more participant ids are unknown or inactive".into(),
                )
                .into());
            }
        }

        let query = format!(
            "INSERT INTO reservations
                (room_id, requester_id, slot_label, starts_at, ends_at, note, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(input.room_id)
            .bind(input.requester_id)
            .bind(&input.slot_label)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.note)
            .bind(input.status_id)
            .fetch_one(&mut *tx)
            .await?;

        if !input.participant_ids.is_empty() {
            sqlx::query(
                "INSERT INTO reservation_participants (reservation_id, user_id)
                 SELECT $1, UNNEST($2::BIGINT[])",
            )
            .bind(reservation.id)
            .bind(&input.participant_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(reservation)
    }

    /// Find a reservation by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Participant user ids for a reservation.
    pub async fn participant_ids(pool: &PgPool, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM reservation_participants
             WHERE reservation_id = $1
             ORDER BY user_id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await
    }

    /// A user's reservations (as requester), newest start first.
    pub async fn list_for_requester(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE requester_id = $1
             ORDER BY starts_at DESC
             LIMIT {LIST_LIMIT}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Occupying reservations (Approved/CheckedIn/Completed) overlapping the
    /// `[day_start, day_end)` window for a room, ordered by start.
    pub async fn occupancy_for_window(
        pool: &PgPool,
        room_id: DbId,
        day_start: Timestamp,
        day_end: Timestamp,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE room_id = $1
               AND status_id = ANY($2)
               AND starts_at < $4
               AND ends_at > $3
             ORDER BY starts_at ASC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(room_id)
            .bind(&OCCUPYING_STATUSES[..])
            .bind(day_start)
            .bind(day_end)
            .fetch_all(pool)
            .await
    }

    /// Approve or reject a pending reservation.
    ///
    /// A single conditional update: only the Pending row transitions, so a
    /// racing approve/cancel loser observes `ALREADY_DECIDED`.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        approver_id: DbId,
        action: DecisionAction,
    ) -> Result<Reservation, RepoError> {
        let target = match action {
            DecisionAction::Approve => ReservationStatus::Approved,
            DecisionAction::Reject => ReservationStatus::Rejected,
        };
        let query = format!(
            "UPDATE reservations
             SET status_id = $2, approver_id = $3, decided_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(target.id())
            .bind(approver_id)
            .bind(ReservationStatus::Pending.id())
            .fetch_optional(pool)
            .await?;

        match updated {
            Some(reservation) => Ok(reservation),
            None => {
                let exists: Option<(StatusId,)> =
                    sqlx::query_as("SELECT status_id FROM reservations WHERE id = $1")
                        .bind(id)
                        .fetch_optional(pool)
                        .await?;
                match exists {
                    None => Err(BookingError::NotFound {
                        entity: "Reservation",
                    }
                    .into()),
                    Some(_) => Err(BookingError::AlreadyDecided.into()),
                }
            }
        }
    }

    /// Cancel a reservation as its requester.
    ///
    /// Runs in a transaction with the row locked so a racing decision or
    /// check-in cannot interleave: the current status must permit a
    /// transition to Cancelled, and only up to 60 minutes before the start.
    pub async fn cancel(
        pool: &PgPool,
        id: DbId,
        actor_id: DbId,
        now: Timestamp,
    ) -> Result<Reservation, RepoError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE");
        let reservation = sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(BookingError::NotFound {
                entity: "Reservation",
            })?;

        if reservation.requester_id != actor_id {
            return Err(BookingError::NotOwner.into());
        }
        if !state_machine::can_transition(reservation.status_id, ReservationStatus::Cancelled.id())
        {
            return Err(BookingError::CannotCancelStatus.into());
        }
        if !within_cancel_cutoff(now, reservation.starts_at) {
            return Err(BookingError::CancelTooLate.into());
        }

        let query = format!(
            "UPDATE reservations
             SET status_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let cancelled = sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(ReservationStatus::Cancelled.id())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(cancelled)
    }

    /// Transition Approved reservations whose end has passed without a
    /// check-in to NoShow. Idempotent; returns the number of rows swept.
    pub async fn sweep_no_shows(pool: &PgPool, as_of: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reservations
             SET status_id = $2, updated_at = NOW()
             WHERE status_id = $1 AND ends_at < $3",
        )
        .bind(ReservationStatus::Approved.id())
        .bind(ReservationStatus::NoShow.id())
        .bind(as_of)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Earliest reservation in the `[day_start, day_end)` window with the
    /// given status where the user is requester or participant. Backs the
    /// kiosk best-match lookup.
    pub async fn earliest_for_user_in_window(
        pool: &PgPool,
        user_id: DbId,
        status: ReservationStatus,
        day_start: Timestamp,
        day_end: Timestamp,
    ) -> Result<Option<ReservationSummary>, sqlx::Error> {
        sqlx::query_as::<_, ReservationSummary>(
            "SELECT r.id, r.room_id, rm.code AS room_code, r.slot_label,
                    r.starts_at, r.ends_at, r.status_id
             FROM reservations r
             JOIN rooms rm ON rm.id = r.room_id
             WHERE r.status_id = $2
               AND r.starts_at < $4
               AND r.ends_at > $3
               AND (r.requester_id = $1 OR EXISTS (
                   SELECT 1 FROM reservation_participants p
                   WHERE p.reservation_id = r.id AND p.user_id = $1
               ))
             ORDER BY r.starts_at ASC
             LIMIT 1",
        )
        .bind(user_id)
        .bind(status.id())
        .bind(day_start)
        .bind(day_end)
        .fetch_optional(pool)
        .await
    }
}
