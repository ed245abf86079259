pub mod admin;
pub mod kiosk;
pub mod reservation;
pub mod room;
