//! Key-loan audit models.

use serde::Serialize;
use sqlx::FromRow;
use roomkey_core::types::{DbId, Timestamp};

/// A row from the `key_loans` table. Append-only: created at check-in,
/// stamped once at return, never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KeyLoan {
    pub id: DbId,
    pub reservation_id: DbId,
    pub key_id: DbId,
    pub borrower_id: DbId,
    pub issued_at: Timestamp,
    pub returned_by: Option<DbId>,
    pub returned_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a successful check-in: the loan plus the key code to hand out.
#[derive(Debug, Clone, Serialize)]
pub struct IssueReceipt {
    pub loan: KeyLoan,
    pub key_code: String,
}
