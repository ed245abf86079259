use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use roomkey_core::error::BookingError;
use roomkey_db::error::RepoError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`BookingError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level rejection from `roomkey_core`.
    #[error(transparent)]
    Domain(#[from] BookingError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(domain) => AppError::Domain(domain),
            RepoError::Sqlx(sqlx) => AppError::Database(sqlx),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Domain(domain) => (domain_status(domain), domain.code(), self.to_string()),

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// HTTP status for a domain rejection.
///
/// Input and business-rule violations are 400, lost races over shared
/// resources are 409, ownership failures are 403, rejected identity
/// tokens are 401, and missing rows are 404.
fn domain_status(err: &BookingError) -> StatusCode {
    match err {
        BookingError::DateOutOfRange
        | BookingError::InvalidSlot(_)
        | BookingError::TooManySlots { .. }
        | BookingError::SlotNotConsecutive
        | BookingError::ParticipantLimitExceeded { .. }
        | BookingError::InvalidParticipants(_) => StatusCode::BAD_REQUEST,

        BookingError::RoomAlreadyReserved
        | BookingError::ConflictWithClassSchedule
        | BookingError::AlreadyDecided
        | BookingError::CannotCancelStatus
        | BookingError::CancelTooLate
        | BookingError::InvalidStatus
        | BookingError::AlreadyHasLoan
        | BookingError::NoLoan
        | BookingError::NoAvailableKey => StatusCode::CONFLICT,

        BookingError::NotOwner => StatusCode::FORBIDDEN,

        BookingError::BadQrToken(_) => StatusCode::UNAUTHORIZED,

        BookingError::NoMatchingCheckinReservationToday
        | BookingError::NoMatchingReturnReservationToday
        | BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Pool exhaustion maps to 503 `RETRY_LATER`: the operation was never
///   attempted, so the client can safely retry.
/// - Serialization failures and deadlocks (PostgreSQL 40001/40P01) also
///   map to 503 `RETRY_LATER`.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::PoolTimedOut => (
            StatusCode::SERVICE_UNAVAILABLE,
            "RETRY_LATER",
            "Storage is busy, please retry".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if matches!(db_err.code().as_deref(), Some("40001") | Some("40P01")) {
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "RETRY_LATER",
                    "Storage is busy, please retry".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
