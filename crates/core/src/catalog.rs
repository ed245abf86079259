//! Canonical day-slot catalog and civil-time conversion.
//!
//! A slot is a configuration-defined clock interval used as the unit of
//! booking granularity. The deployment runs in a single fixed timezone;
//! all civil-date math goes through [`CivilClock`] so the UTC offset is an
//! explicit value, not ambient state.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::types::Timestamp;

/// Maximum number of slots a single reservation may span.
pub const MAX_SLOTS_PER_RESERVATION: usize = 2;

/// A canonical bookable clock interval within a civil day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Stable catalog id (e.g. `"A1"`).
    pub id: &'static str,
    /// Human-readable label (e.g. `"08:00-10:00"`).
    pub label: &'static str,
    /// Local wall-clock start.
    pub start: NaiveTime,
    /// Local wall-clock end (exclusive).
    pub end: NaiveTime,
}

/// The ordered set of canonical slots for a deployment.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    slots: Vec<Slot>,
}

/// Build a `NaiveTime` from hour/minute literals known to be valid.
fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}

impl SlotCatalog {
    /// The standard six-slot catalog: three contiguous two-hour blocks in
    /// the morning and afternoon each.
    pub fn standard() -> Self {
        Self {
            slots: vec![
                Slot { id: "A1", label: "08:00-10:00", start: hm(8, 0), end: hm(10, 0) },
                Slot { id: "A2", label: "10:00-12:00", start: hm(10, 0), end: hm(12, 0) },
                Slot { id: "P1", label: "12:00-14:00", start: hm(12, 0), end: hm(14, 0) },
                Slot { id: "P2", label: "14:00-16:00", start: hm(14, 0), end: hm(16, 0) },
                Slot { id: "E1", label: "16:00-18:00", start: hm(16, 0), end: hm(18, 0) },
                Slot { id: "E2", label: "18:00-20:00", start: hm(18, 0), end: hm(20, 0) },
            ],
        }
    }

    /// All slots in catalog order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Look up a slot by its catalog id.
    pub fn find(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Whether `second` starts exactly where `first` ends (no gap).
    pub fn are_adjacent(&self, first: &Slot, second: &Slot) -> bool {
        first.end == second.start
    }
}

/// Civil-time conversion for the deployment's fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct CivilClock {
    offset_minutes: i32,
}

impl CivilClock {
    pub fn new(offset_minutes: i32) -> Self {
        Self { offset_minutes }
    }

    fn offset(&self) -> Duration {
        Duration::minutes(i64::from(self.offset_minutes))
    }

    /// The civil date at `instant` in the deployment timezone.
    pub fn civil_date(&self, instant: Timestamp) -> NaiveDate {
        (instant + self.offset()).date_naive()
    }

    /// Convert a local wall-clock datetime to an absolute instant.
    pub fn to_instant(&self, local: NaiveDateTime) -> Timestamp {
        Utc.from_utc_datetime(&(local - self.offset()))
    }

    /// The `[start, end)` instant pair for local midnight-to-midnight on `date`.
    pub fn day_window(&self, date: NaiveDate) -> (Timestamp, Timestamp) {
        let start = self.to_instant(date.and_time(NaiveTime::MIN));
        (start, start + Duration::days(1))
    }

    /// The absolute window covered by `[start, end)` local time on `date`.
    pub fn slot_window(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> (Timestamp, Timestamp) {
        (
            self.to_instant(date.and_time(start)),
            self.to_instant(date.and_time(end)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_contiguous() {
        let catalog = SlotCatalog::standard();
        let slots = catalog.slots();
        assert_eq!(slots.len(), 6);
        for pair in slots.windows(2) {
            assert!(catalog.are_adjacent(&pair[0], &pair[1]));
        }
    }

    #[test]
    fn find_known_and_unknown_ids() {
        let catalog = SlotCatalog::standard();
        assert_eq!(catalog.find("A1").map(|s| s.label), Some("08:00-10:00"));
        assert!(catalog.find("Z9").is_none());
    }

    #[test]
    fn day_window_respects_offset() {
        // UTC+8: local midnight on 2025-06-01 is 2025-05-31T16:00Z.
        let clock = CivilClock::new(8 * 60);
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let (start, end) = clock.day_window(date);
        assert_eq!(start.to_rfc3339(), "2025-05-31T16:00:00+00:00");
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn civil_date_rolls_over_at_local_midnight() {
        let clock = CivilClock::new(8 * 60);
        // 2025-05-31T17:30Z is already 2025-06-01 01:30 local.
        let instant = Utc.with_ymd_and_hms(2025, 5, 31, 17, 30, 0).unwrap();
        assert_eq!(
            clock.civil_date(instant),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn slot_window_spans_slot_times() {
        let clock = CivilClock::new(0);
        let catalog = SlotCatalog::standard();
        let slot = catalog.find("A1").unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let (start, end) = clock.slot_window(date, slot.start, slot.end);
        assert_eq!(end - start, Duration::hours(2));
        assert_eq!(start.to_rfc3339(), "2025-06-01T08:00:00+00:00");
    }
}
