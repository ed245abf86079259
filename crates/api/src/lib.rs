//! HTTP surface of the reservation and key-custody engine.
//!
//! Exposed as a library so integration tests can build the exact router the
//! production binary serves.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
