//! Repository for the `key_loans` audit trail.
//!
//! Loans are created and closed only by `custody_repo`; this repo is the
//! read side.

use sqlx::PgPool;
use roomkey_core::types::DbId;

use crate::models::loan::KeyLoan;

/// Column list for `key_loans` queries.
pub(crate) const LOAN_COLUMNS: &str = "\
    id, reservation_id, key_id, borrower_id, issued_at, \
    returned_by, returned_at, created_at, updated_at";

/// Read access to key loans.
pub struct LoanRepo;

impl LoanRepo {
    /// The live (not yet returned) loan for a reservation, if any.
    pub async fn live_for_reservation(
        pool: &PgPool,
        reservation_id: DbId,
    ) -> Result<Option<KeyLoan>, sqlx::Error> {
        let query = format!(
            "SELECT {LOAN_COLUMNS} FROM key_loans
             WHERE reservation_id = $1 AND returned_at IS NULL"
        );
        sqlx::query_as::<_, KeyLoan>(&query)
            .bind(reservation_id)
            .fetch_optional(pool)
            .await
    }

    /// Full loan history for a key, newest first.
    pub async fn list_for_key(pool: &PgPool, key_id: DbId) -> Result<Vec<KeyLoan>, sqlx::Error> {
        let query = format!(
            "SELECT {LOAN_COLUMNS} FROM key_loans
             WHERE key_id = $1
             ORDER BY issued_at DESC"
        );
        sqlx::query_as::<_, KeyLoan>(&query)
            .bind(key_id)
            .fetch_all(pool)
            .await
    }
}
