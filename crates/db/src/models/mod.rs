//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where the row is client-shaped

pub mod key;
pub mod loan;
pub mod reservation;
pub mod room;
pub mod section;
pub mod status;
pub mod term;
pub mod user;
