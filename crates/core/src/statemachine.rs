//! Reservation status constants and state machine.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future worker or CLI tooling.

use crate::types::Timestamp;

/// Minutes before the reservation start after which cancellation is refused.
pub const CANCEL_CUTOFF_MINS: i64 = 60;

/// Whether a cancellation issued at `now` beats the cutoff.
///
/// The boundary is inclusive: cancelling at exactly `start - 60min` succeeds.
pub fn within_cancel_cutoff(now: Timestamp, start: Timestamp) -> bool {
    now <= start - chrono::Duration::minutes(CANCEL_CUTOFF_MINS)
}

/// Reservation status IDs matching `reservation_statuses` seed data
/// (1-based SMALLSERIAL).
///
/// The numeric IDs mirror the `db` crate's `ReservationStatus` enum because
/// `core` must have zero internal deps; name lookups delegate here.
pub mod state_machine {
    /// Returns the set of valid target status IDs reachable from `from_status`.
    ///
    /// Terminal states (Rejected=3, Cancelled=4, NoShow=5, Completed=7)
    /// return an empty slice because no further transitions are allowed.
    pub fn valid_transitions(from_status: i16) -> &'static [i16] {
        match from_status {
            // Pending -> Approved, Rejected, Cancelled
            1 => &[2, 3, 4],
            // Approved -> Cancelled, NoShow, CheckedIn
            2 => &[4, 5, 6],
            // CheckedIn -> Completed
            6 => &[7],
            // Terminal states: Rejected, Cancelled, NoShow, Completed
            3 | 4 | 5 | 7 => &[],
            // Unknown status: no transitions allowed
            _ => &[],
        }
    }

    /// Check whether a transition from `from` to `to` is valid.
    pub fn can_transition(from: i16, to: i16) -> bool {
        valid_transitions(from).contains(&to)
    }

    /// Lookup-table name for a status ID, matching the `reservation_statuses`
    /// seed rows. Used in API payloads and logs.
    pub fn status_name(id: i16) -> &'static str {
        match id {
            1 => "pending",
            2 => "approved",
            3 => "rejected",
            4 => "cancelled",
            5 => "no_show",
            6 => "checked_in",
            7 => "completed",
            _ => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::state_machine::*;

    // -----------------------------------------------------------------------
    // Valid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_approved() {
        assert!(can_transition(1, 2));
    }

    #[test]
    fn pending_to_rejected() {
        assert!(can_transition(1, 3));
    }

    #[test]
    fn pending_to_cancelled() {
        assert!(can_transition(1, 4));
    }

    #[test]
    fn approved_to_cancelled() {
        assert!(can_transition(2, 4));
    }

    #[test]
    fn approved_to_no_show() {
        assert!(can_transition(2, 5));
    }

    #[test]
    fn approved_to_checked_in() {
        assert!(can_transition(2, 6));
    }

    #[test]
    fn checked_in_to_completed() {
        assert!(can_transition(6, 7));
    }

    // -----------------------------------------------------------------------
    // Terminal states have no outgoing transitions
    // -----------------------------------------------------------------------

    #[test]
    fn rejected_has_no_transitions() {
        assert!(valid_transitions(3).is_empty());
    }

    #[test]
    fn cancelled_has_no_transitions() {
        assert!(valid_transitions(4).is_empty());
    }

    #[test]
    fn no_show_has_no_transitions() {
        assert!(valid_transitions(5).is_empty());
    }

    #[test]
    fn completed_has_no_transitions() {
        assert!(valid_transitions(7).is_empty());
    }

    // -----------------------------------------------------------------------
    // Invalid transitions
    // -----------------------------------------------------------------------

    #[test]
    fn pending_to_checked_in_invalid() {
        assert!(!can_transition(1, 6));
    }

    #[test]
    fn pending_to_completed_invalid() {
        assert!(!can_transition(1, 7));
    }

    #[test]
    fn approved_to_rejected_invalid() {
        assert!(!can_transition(2, 3));
    }

    #[test]
    fn checked_in_to_cancelled_invalid() {
        assert!(!can_transition(6, 4));
    }

    #[test]
    fn completed_to_checked_in_invalid() {
        assert!(!can_transition(7, 6));
    }

    #[test]
    fn unknown_status_has_no_transitions() {
        assert!(valid_transitions(99).is_empty());
    }

    // -----------------------------------------------------------------------
    // Cancellation cutoff boundary
    // -----------------------------------------------------------------------

    #[test]
    fn cancel_at_exactly_sixty_minutes_succeeds() {
        use chrono::{Duration, TimeZone, Utc};
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        assert!(super::within_cancel_cutoff(start - Duration::minutes(60), start));
    }

    #[test]
    fn cancel_one_second_past_cutoff_fails() {
        use chrono::{Duration, TimeZone, Utc};
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let now = start - Duration::minutes(60) + Duration::seconds(1);
        assert!(!super::within_cancel_cutoff(now, start));
    }

    #[test]
    fn status_names_match_seed_rows() {
        assert_eq!(status_name(1), "pending");
        assert_eq!(status_name(6), "checked_in");
        assert_eq!(status_name(42), "unknown");
    }
}
