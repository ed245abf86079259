//! Pure domain logic for the room reservation and key-custody engine.
//!
//! This crate has zero internal dependencies and performs no I/O so it can
//! be used by the repository layer, the API layer, and any future CLI or
//! worker tooling.

pub mod availability;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod roles;
pub mod statemachine;
pub mod types;
