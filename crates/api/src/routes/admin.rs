//! Route definitions for admin maintenance (admin role enforced per handler).

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// POST /sweep-no-shows         -> sweep_no_shows
/// POST /keys/{key_id}/status   -> set_key_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sweep-no-shows", post(admin::sweep_no_shows))
        .route("/keys/{key_id}/status", post(admin::set_key_status))
}
