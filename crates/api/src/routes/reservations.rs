//! Route definitions for the reservation lifecycle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reservation;
use crate::state::AppState;

/// Reservation routes mounted at `/reservations`.
///
/// ```text
/// POST /              -> create_reservation
/// GET  /mine          -> my_reservations
/// GET  /{id}          -> get_reservation
/// POST /{id}/decide   -> decide_reservation (staff only)
/// POST /{id}/cancel   -> cancel_reservation (requester only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservation::create_reservation))
        .route("/mine", get(reservation::my_reservations))
        .route("/{id}", get(reservation::get_reservation))
        .route("/{id}/decide", post(reservation::decide_reservation))
        .route("/{id}/cancel", post(reservation::cancel_reservation))
}
