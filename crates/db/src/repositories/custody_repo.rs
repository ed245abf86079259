//! Key-custody transaction engine.
//!
//! Check-in (issue key) and return (release key) each run as one
//! all-or-nothing transaction. The reservation row is locked `FOR UPDATE`
//! so concurrent attempts against the same reservation serialize, and the
//! key claim uses `FOR UPDATE SKIP LOCKED` so concurrent claims against the
//! same key pool cannot issue the same key twice.

use sqlx::{PgPool, Postgres, Transaction};
use roomkey_core::error::BookingError;
use roomkey_core::types::DbId;

use crate::error::RepoError;
use crate::models::loan::{IssueReceipt, KeyLoan};
use crate::models::reservation::Reservation;
use crate::models::status::{KeyStatus, ReservationStatus};
use crate::repositories::loan_repo::LOAN_COLUMNS;

/// Column list for the locked reservation read.
const RESERVATION_COLUMNS: &str = "\
    id, room_id, requester_id, slot_label, starts_at, ends_at, note, \
    status_id, approver_id, decided_at, created_at, updated_at";

/// Atomic check-in and return operations.
pub struct CustodyRepo;

impl CustodyRepo {
    /// Issue a key for an approved reservation.
    ///
    /// Ordering note: the live-loan check runs before the status check so
    /// that the loser of a concurrent check-in race observes
    /// `ALREADY_HAS_LOAN` rather than a generic status error.
    pub async fn check_in(
        pool: &PgPool,
        reservation_id: DbId,
        user_id: DbId,
    ) -> Result<IssueReceipt, RepoError> {
        let mut tx = pool.begin().await?;

        let reservation = lock_reservation(&mut tx, reservation_id).await?;

        let live_loan: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM key_loans WHERE reservation_id = $1 AND returned_at IS NULL",
        )
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await?;
        if live_loan.is_some() {
            return Err(BookingError::AlreadyHasLoan.into());
        }

        if reservation.status_id != ReservationStatus::Approved.id() {
            return Err(BookingError::InvalidStatus.into());
        }

        if !is_member(&mut tx, &reservation, user_id).await? {
            return Err(BookingError::NotOwner.into());
        }

        // Claim any available key from the room's pool. SKIP LOCKED makes a
        // concurrent claimer move past rows this transaction holds, so the
        // select-and-flip stays conditioned on the key still being available
        // at commit time.
        let key: Option<(DbId, String)> = sqlx::query_as(
            "UPDATE room_keys
             SET status_id = $2, updated_at = NOW()
             WHERE id = (
                 SELECT id FROM room_keys
                 WHERE room_id = $1 AND status_id = $3
                 ORDER BY id ASC
                 LIMIT 1
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING id, code",
        )
        .bind(reservation.room_id)
        .bind(KeyStatus::Borrowed.id())
        .bind(KeyStatus::Available.id())
        .fetch_optional(&mut *tx)
        .await?;
        let (key_id, key_code) = key.ok_or(BookingError::NoAvailableKey)?;

        let query = format!(
            "INSERT INTO key_loans (reservation_id, key_id, borrower_id)
             VALUES ($1, $2, $3)
             RETURNING {LOAN_COLUMNS}"
        );
        let loan = sqlx::query_as::<_, KeyLoan>(&query)
            .bind(reservation_id)
            .bind(key_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE reservations SET status_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(reservation_id)
            .bind(ReservationStatus::CheckedIn.id())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            reservation_id,
            key_id,
            borrower_id = user_id,
            "Key issued"
        );
        Ok(IssueReceipt { loan, key_code })
    }

    /// Release the key for a checked-in reservation.
    pub async fn return_key(
        pool: &PgPool,
        reservation_id: DbId,
        user_id: DbId,
    ) -> Result<KeyLoan, RepoError> {
        let mut tx = pool.begin().await?;

        let reservation = lock_reservation(&mut tx, reservation_id).await?;

        if reservation.status_id != ReservationStatus::CheckedIn.id() {
            return Err(BookingError::InvalidStatus.into());
        }

        let query = format!(
            "SELECT {LOAN_COLUMNS} FROM key_loans
             WHERE reservation_id = $1 AND returned_at IS NULL
             FOR UPDATE"
        );
        let loan = sqlx::query_as::<_, KeyLoan>(&query)
            .bind(reservation_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(BookingError::NoLoan)?;

        // Return admits the original borrower on top of the reservation's
        // requester and participants.
        let owns = loan.borrower_id == user_id || is_member(&mut tx, &reservation, user_id).await?;
        if !owns {
            return Err(BookingError::NotOwner.into());
        }

        let query = format!(
            "UPDATE key_loans
             SET returned_by = $2, returned_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {LOAN_COLUMNS}"
        );
        let closed = sqlx::query_as::<_, KeyLoan>(&query)
            .bind(loan.id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE room_keys SET status_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(loan.key_id)
            .bind(KeyStatus::Available.id())
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE reservations SET status_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(reservation_id)
            .bind(ReservationStatus::Completed.id())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            reservation_id,
            key_id = loan.key_id,
            returned_by = user_id,
            "Key returned"
        );
        Ok(closed)
    }
}

/// Load and row-lock a reservation inside the current transaction.
async fn lock_reservation(
    tx: &mut Transaction<'_, Postgres>,
    reservation_id: DbId,
) -> Result<Reservation, RepoError> {
    let query = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, Reservation>(&query)
        .bind(reservation_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            BookingError::NotFound {
                entity: "Reservation",
            }
            .into()
        })
}

/// Whether `user_id` is the requester or a listed participant.
async fn is_member(
    tx: &mut Transaction<'_, Postgres>,
    reservation: &Reservation,
    user_id: DbId,
) -> Result<bool, sqlx::Error> {
    if reservation.requester_id == user_id {
        return Ok(true);
    }
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (
             SELECT 1 FROM reservation_participants
             WHERE reservation_id = $1 AND user_id = $2
         )",
    )
    .bind(reservation.id)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await
}
