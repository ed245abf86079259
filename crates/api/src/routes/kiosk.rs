//! Route definitions for the key kiosk.

use axum::routing::post;
use axum::Router;

use crate::handlers::kiosk;
use crate::state::AppState;

/// Kiosk routes mounted at `/kiosk`. All require the `x-kiosk-key` device
/// header; user identity comes from the scanned QR token in the body.
///
/// ```text
/// POST /lookup     -> lookup
/// POST /check-in   -> check_in
/// POST /return     -> return_key
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lookup", post(kiosk::lookup))
        .route("/check-in", post(kiosk::check_in))
        .route("/return", post(kiosk::return_key))
}
