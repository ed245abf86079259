pub mod auth;
pub mod kiosk;
pub mod rbac;
