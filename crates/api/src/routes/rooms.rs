//! Route definitions for the room directory and availability views.

use axum::routing::get;
use axum::Router;

use crate::handlers::room;
use crate::state::AppState;

/// Room routes mounted at `/rooms`.
///
/// ```text
/// GET /                          -> list_rooms
/// GET /{room_id}/availability    -> get_availability (?date=YYYY-MM-DD)
/// GET /{room_id}/day             -> get_day_grid (?date=YYYY-MM-DD)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(room::list_rooms))
        .route("/{room_id}/availability", get(room::get_availability))
        .route("/{room_id}/day", get(room::get_day_grid))
}
