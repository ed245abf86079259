//! Domain error taxonomy.
//!
//! Every rejected operation carries a stable machine-readable code so the
//! UI can render an exact remediation message. Business-rule and
//! state-machine violations are surfaced verbatim to the caller and are
//! never retried automatically; only storage contention is retryable, and
//! that class lives in the API layer, not here.

/// Reason a scanned identity token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    BadSignature,
}

impl TokenError {
    /// Short reason string embedded in the `BAD_QR_TOKEN` error detail.
    pub fn reason(self) -> &'static str {
        match self {
            TokenError::Expired => "expired",
            TokenError::Malformed => "malformed",
            TokenError::BadSignature => "bad-signature",
        }
    }
}

/// A rejected booking, decision, or custody operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    // --- Creation-time input / business-rule violations ---
    #[error("Requested date is outside the booking window")]
    DateOutOfRange,

    #[error("Unknown slot id: {0}")]
    InvalidSlot(String),

    #[error("At most {max} slots may be selected")]
    TooManySlots { max: usize },

    #[error("Selected slots are not consecutive")]
    SlotNotConsecutive,

    #[error("Room is already reserved in that time window")]
    RoomAlreadyReserved,

    #[error("Requested window conflicts with the class schedule")]
    ConflictWithClassSchedule,

    #[error("Participant limit exceeded: headcount must not exceed {max}")]
    ParticipantLimitExceeded { max: usize },

    #[error("Participant list is invalid: {0}")]
    InvalidParticipants(String),

    // --- State-machine / ownership violations ---
    #[error("Reservation has already been decided")]
    AlreadyDecided,

    #[error("Reservation cannot be cancelled from its current status")]
    CannotCancelStatus,

    #[error("Too late to cancel this reservation")]
    CancelTooLate,

    #[error("Reservation is not in a valid status for this operation")]
    InvalidStatus,

    #[error("Reservation already has a live key loan")]
    AlreadyHasLoan,

    #[error("Reservation has no live key loan")]
    NoLoan,

    #[error("User does not own this reservation")]
    NotOwner,

    #[error("No key is available for this room")]
    NoAvailableKey,

    // --- Identity / lookup ---
    #[error("Identity token rejected: {0}")]
    BadQrToken(TokenError),

    #[error("No matching check-in reservation today")]
    NoMatchingCheckinReservationToday,

    #[error("No matching return reservation today")]
    NoMatchingReturnReservationToday,

    // --- Lookups against missing rows ---
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
}

impl BookingError {
    /// The stable machine-readable error code for this rejection.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::DateOutOfRange => "DATE_OUT_OF_RANGE",
            BookingError::InvalidSlot(_) => "INVALID_SLOT",
            BookingError::TooManySlots { .. } => "TOO_MANY_SLOTS",
            BookingError::SlotNotConsecutive => "SLOT_NOT_CONSECUTIVE",
            BookingError::RoomAlreadyReserved => "ROOM_ALREADY_RESERVED",
            BookingError::ConflictWithClassSchedule => "CONFLICT_WITH_CLASS_SCHEDULE",
            BookingError::ParticipantLimitExceeded { .. } => "PARTICIPANT_LIMIT_EXCEEDED",
            BookingError::InvalidParticipants(_) => "INVALID_PARTICIPANTS",
            BookingError::AlreadyDecided => "ALREADY_DECIDED",
            BookingError::CannotCancelStatus => "CANNOT_CANCEL_STATUS",
            BookingError::CancelTooLate => "CANCEL_TOO_LATE",
            BookingError::InvalidStatus => "INVALID_STATUS",
            BookingError::AlreadyHasLoan => "ALREADY_HAS_LOAN",
            BookingError::NoLoan => "NO_LOAN",
            BookingError::NotOwner => "NOT_OWNER",
            BookingError::NoAvailableKey => "NO_AVAILABLE_KEY",
            BookingError::BadQrToken(_) => "BAD_QR_TOKEN",
            BookingError::NoMatchingCheckinReservationToday => {
                "NO_MATCHING_CHECKIN_RESERVATION_TODAY"
            }
            BookingError::NoMatchingReturnReservationToday => {
                "NO_MATCHING_RETURN_RESERVATION_TODAY"
            }
            BookingError::NotFound { .. } => "NOT_FOUND",
        }
    }
}
