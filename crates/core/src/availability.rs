//! Per-slot free/busy computation.
//!
//! Merges existing reservation occupancy with recurring class-schedule
//! occupancy over the canonical slot catalog. The overlap predicate here is
//! the single source of truth; the SQL conflict re-check in the repository
//! layer mirrors it.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{CivilClock, SlotCatalog};
use crate::types::Timestamp;

/// Why a slot is unavailable. First match wins; reservations are checked
/// before class-schedule occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnavailableReason {
    RoomAlreadyReserved,
    ConflictWithClassSchedule,
}

/// Availability of one canonical slot on one civil date.
#[derive(Debug, Clone, Serialize)]
pub struct SlotStatus {
    pub id: &'static str,
    pub label: &'static str,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnavailableReason>,
}

/// Half-open interval intersection: `[a_start, a_end)` meets `[b_start, b_end)`.
pub fn overlaps(a_start: Timestamp, a_end: Timestamp, b_start: Timestamp, b_end: Timestamp) -> bool {
    a_start < b_end && a_end > b_start
}

/// Compute availability for every catalog slot on `date`.
///
/// `reservations` holds the absolute windows of reservations with status
/// Approved, CheckedIn, or Completed; `class_meetings` holds the windows of
/// section meetings whose term is active and covers `date`.
pub fn mark_slots(
    catalog: &SlotCatalog,
    clock: CivilClock,
    date: NaiveDate,
    reservations: &[(Timestamp, Timestamp)],
    class_meetings: &[(Timestamp, Timestamp)],
) -> Vec<SlotStatus> {
    catalog
        .slots()
        .iter()
        .map(|slot| {
            let (start, end) = clock.slot_window(date, slot.start, slot.end);
            let reason = if reservations.iter().any(|&(s, e)| overlaps(start, end, s, e)) {
                Some(UnavailableReason::RoomAlreadyReserved)
            } else if class_meetings.iter().any(|&(s, e)| overlaps(start, end, s, e)) {
                Some(UnavailableReason::ConflictWithClassSchedule)
            } else {
                None
            };
            SlotStatus {
                id: slot.id,
                label: slot.label,
                available: reason.is_none(),
                reason,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use rand::Rng;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn at(hour: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, min, 0).unwrap()
    }

    #[test]
    fn empty_day_is_fully_available() {
        let statuses = mark_slots(
            &SlotCatalog::standard(),
            CivilClock::new(0),
            date(),
            &[],
            &[],
        );
        assert!(statuses.iter().all(|s| s.available && s.reason.is_none()));
    }

    #[test]
    fn reservation_blocks_covered_slots_only() {
        // 09:00-11:00 straddles A1 and A2 but leaves the rest free.
        let statuses = mark_slots(
            &SlotCatalog::standard(),
            CivilClock::new(0),
            date(),
            &[(at(9, 0), at(11, 0))],
            &[],
        );
        assert_eq!(statuses[0].reason, Some(UnavailableReason::RoomAlreadyReserved));
        assert_eq!(statuses[1].reason, Some(UnavailableReason::RoomAlreadyReserved));
        assert!(statuses[2..].iter().all(|s| s.available));
    }

    #[test]
    fn reservation_wins_over_class_meeting() {
        let statuses = mark_slots(
            &SlotCatalog::standard(),
            CivilClock::new(0),
            date(),
            &[(at(8, 0), at(10, 0))],
            &[(at(8, 0), at(10, 0))],
        );
        assert_eq!(statuses[0].reason, Some(UnavailableReason::RoomAlreadyReserved));
    }

    #[test]
    fn class_meeting_blocks_slot() {
        let statuses = mark_slots(
            &SlotCatalog::standard(),
            CivilClock::new(0),
            date(),
            &[],
            &[(at(14, 0), at(16, 0))],
        );
        assert_eq!(
            statuses[3].reason,
            Some(UnavailableReason::ConflictWithClassSchedule)
        );
        assert!(statuses[0].available && statuses[5].available);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        // An occupant ending exactly at 10:00 leaves A2 (10:00-12:00) free.
        let statuses = mark_slots(
            &SlotCatalog::standard(),
            CivilClock::new(0),
            date(),
            &[(at(8, 0), at(10, 0))],
            &[],
        );
        assert!(!statuses[0].available);
        assert!(statuses[1].available);
    }

    /// Property: a slot is marked unavailable iff some occupant interval
    /// truly intersects it, checked against a minute-resolution reference.
    #[test]
    fn marking_matches_reference_predicate_on_random_intervals() {
        let catalog = SlotCatalog::standard();
        let clock = CivilClock::new(0);
        let mut rng = rand::rng();

        for _ in 0..200 {
            let mut occupants = Vec::new();
            for _ in 0..rng.random_range(0..4) {
                let start_min: i64 = rng.random_range(0..1380);
                let len_min: i64 = rng.random_range(1..240);
                let start = at(0, 0) + Duration::minutes(start_min);
                occupants.push((start, start + Duration::minutes(len_min)));
            }

            let statuses = mark_slots(&catalog, clock, date(), &occupants, &[]);

            for (slot, status) in catalog.slots().iter().zip(&statuses) {
                let (s_start, s_end) = clock.slot_window(date(), slot.start, slot.end);
                // Reference: scan every minute of the slot for containment.
                let mut truly_busy = false;
                let mut t = s_start;
                while t < s_end {
                    if occupants.iter().any(|&(os, oe)| t >= os && t < oe) {
                        truly_busy = true;
                        break;
                    }
                    t += Duration::minutes(1);
                }
                assert_eq!(
                    !status.available, truly_busy,
                    "slot {} vs occupants {occupants:?}",
                    slot.id
                );
            }
        }
    }
}
