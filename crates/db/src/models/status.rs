//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Reservation lifecycle status. The transition table lives in
    /// `roomkey_core::statemachine`.
    ReservationStatus {
        Pending = 1,
        Approved = 2,
        Rejected = 3,
        Cancelled = 4,
        NoShow = 5,
        CheckedIn = 6,
        Completed = 7,
    }
}

define_status_enum! {
    /// Physical key status.
    KeyStatus {
        Available = 1,
        Borrowed = 2,
        Lost = 3,
        Damaged = 4,
    }
}

/// Statuses that occupy a room for availability purposes.
pub const OCCUPYING_STATUSES: [StatusId; 3] = [
    ReservationStatus::Approved as StatusId,
    ReservationStatus::CheckedIn as StatusId,
    ReservationStatus::Completed as StatusId,
];

impl ReservationStatus {
    /// Lookup-table name for a status ID (for API payloads and logs).
    pub fn name_of(id: StatusId) -> &'static str {
        roomkey_core::statemachine::state_machine::status_name(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_seed_order() {
        assert_eq!(ReservationStatus::Pending.id(), 1);
        assert_eq!(ReservationStatus::Completed.id(), 7);
        assert_eq!(KeyStatus::Available.id(), 1);
        assert_eq!(KeyStatus::Damaged.id(), 4);
    }

    #[test]
    fn name_of_matches_seed_rows() {
        assert_eq!(ReservationStatus::name_of(2), "approved");
        assert_eq!(ReservationStatus::name_of(5), "no_show");
        assert_eq!(ReservationStatus::name_of(0), "unknown");
    }

    #[test]
    fn occupying_statuses_exclude_rejected_and_cancelled() {
        assert!(!OCCUPYING_STATUSES.contains(&ReservationStatus::Rejected.id()));
        assert!(!OCCUPYING_STATUSES.contains(&ReservationStatus::Cancelled.id()));
        assert!(!OCCUPYING_STATUSES.contains(&ReservationStatus::NoShow.id()));
        assert!(OCCUPYING_STATUSES.contains(&ReservationStatus::CheckedIn.id()));
    }
}
