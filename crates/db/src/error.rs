//! Repository error type.
//!
//! Read-only repos return bare `sqlx::Error`, but the transactional engine
//! operations (booking, decide, cancel, check-in, return) re-evaluate
//! business rules inside their transaction, so they must be able to surface
//! domain rejections as well.

use roomkey_core::error::BookingError;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A business-rule or state-machine rejection with a stable code.
    #[error(transparent)]
    Domain(#[from] BookingError),

    /// A storage failure.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl RepoError {
    /// The domain rejection, if this is one.
    pub fn as_domain(&self) -> Option<&BookingError> {
        match self {
            RepoError::Domain(e) => Some(e),
            RepoError::Sqlx(_) => None,
        }
    }
}
