//! Success envelope shared by every handler.
//!
//! Successful responses wrap their payload as `{ "data": ... }`, mirroring
//! the `{ "error", "code" }` shape produced by [`crate::error::AppError`] so
//! clients can branch on the top-level key. Reservation views, room
//! listings, kiosk lookups and sweep summaries all go through
//! [`DataResponse`] rather than ad-hoc `json!` maps.

use serde::Serialize;

/// `{ "data": T }` wrapper for successful responses.
///
/// ```ignore
/// Ok(Json(DataResponse { data: view }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
