//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-step mutations (booking,
//! cancel, check-in, return) run inside a single transaction and surface
//! domain rejections through [`crate::RepoError`].

pub mod custody_repo;
pub mod key_repo;
pub mod loan_repo;
pub mod reservation_repo;
pub mod room_repo;
pub mod section_repo;
pub mod term_repo;
pub mod user_repo;

pub use custody_repo::CustodyRepo;
pub use key_repo::KeyRepo;
pub use loan_repo::LoanRepo;
pub use reservation_repo::ReservationRepo;
pub use room_repo::RoomRepo;
pub use section_repo::SectionRepo;
pub use term_repo::TermRepo;
pub use user_repo::UserRepo;
