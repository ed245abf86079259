pub mod admin;
pub mod health;
pub mod kiosk;
pub mod reservations;
pub mod rooms;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rooms                           list rooms
/// /rooms/{id}/availability         per-slot free/busy (?date=)
/// /rooms/{id}/day                  merged occupancy grid (?date=)
///
/// /reservations                    create (POST)
/// /reservations/mine               caller's reservations
/// /reservations/{id}               detail (member or staff)
/// /reservations/{id}/decide        approve/reject (staff only)
/// /reservations/{id}/cancel        cancel (requester only)
///
/// /kiosk/lookup                    resolve scan to today's actions
/// /kiosk/check-in                  issue a key
/// /kiosk/return                    take a key back
///
/// /admin/sweep-no-shows            manual no-show sweep (admin only)
/// /admin/keys/{id}/status          key status override (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/rooms", rooms::router())
        .nest("/reservations", reservations::router())
        .nest("/kiosk", kiosk::router())
        .nest("/admin", admin::router())
}
