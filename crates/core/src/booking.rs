//! Creation-time booking rules.
//!
//! Pure validation of the booking request: date window, slot selection,
//! and participant list shape. Existence checks (do the participant ids
//! resolve to active users, is the room free) belong to the repository
//! layer, which re-evaluates conflicts inside the insert transaction.

use chrono::{NaiveDate, NaiveTime};

use crate::catalog::{Slot, SlotCatalog, MAX_SLOTS_PER_RESERVATION};
use crate::error::BookingError;
use crate::types::DbId;

/// Maximum headcount per reservation: the requester plus four participants.
pub const MAX_HEADCOUNT: usize = 5;

/// How far into the future a reservation may be placed, in days.
pub const DEFAULT_BOOKING_WINDOW_DAYS: i64 = 30;

/// The resolved local wall-clock window of a validated slot selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSelection {
    /// Display label, e.g. `"08:00-12:00"` for a two-slot selection.
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Rule 1: the requested date must lie in `[today, today + window_days]`.
pub fn validate_date_window(
    date: NaiveDate,
    today: NaiveDate,
    window_days: i64,
) -> Result<(), BookingError> {
    if date < today || date > today + chrono::Duration::days(window_days) {
        return Err(BookingError::DateOutOfRange);
    }
    Ok(())
}

/// Rules 2-3: resolve slot ids against the catalog and merge them into one
/// contiguous window.
///
/// At most [`MAX_SLOTS_PER_RESERVATION`] slots; two slots must be adjacent
/// with no gap. The selection order does not matter.
pub fn resolve_slot_selection(
    catalog: &SlotCatalog,
    slot_ids: &[String],
) -> Result<SlotSelection, BookingError> {
    if slot_ids.is_empty() {
        return Err(BookingError::InvalidSlot(String::new()));
    }

    // Resolve every id before the count check: an unknown id outranks an
    // oversized selection in the rule order.
    let mut slots: Vec<&Slot> = Vec::with_capacity(slot_ids.len());
    for id in slot_ids {
        let slot = catalog
            .find(id)
            .ok_or_else(|| BookingError::InvalidSlot(id.clone()))?;
        slots.push(slot);
    }

    if slots.len() > MAX_SLOTS_PER_RESERVATION {
        return Err(BookingError::TooManySlots {
            max: MAX_SLOTS_PER_RESERVATION,
        });
    }
    slots.sort_by_key(|s| s.start);

    for pair in slots.windows(2) {
        if !catalog.are_adjacent(pair[0], pair[1]) {
            return Err(BookingError::SlotNotConsecutive);
        }
    }

    let start = slots[0].start;
    let end = slots[slots.len() - 1].end;
    Ok(SlotSelection {
        label: format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
        start,
        end,
    })
}

/// Rule 5 (shape): headcount cap, distinctness, and requester exclusion.
///
/// Whether every id resolves to an existing active user is checked against
/// the store by the caller.
pub fn validate_participants(
    requester_id: DbId,
    participant_ids: &[DbId],
) -> Result<(), BookingError> {
    if 1 + participant_ids.len() > MAX_HEADCOUNT {
        return Err(BookingError::ParticipantLimitExceeded { max: MAX_HEADCOUNT });
    }
    for (i, id) in participant_ids.iter().enumerate() {
        if *id == requester_id {
            return Err(BookingError::InvalidParticipants(
                "requester may not be listed as a participant".into(),
            ));
        }
        if participant_ids[..i].contains(id) {
            return Err(BookingError::InvalidParticipants(format!(
                "duplicate participant id {id}"
            )));
        }
    }
    Ok(())
}
