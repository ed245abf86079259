//! Kiosk device authentication.
//!
//! Kiosks are unattended hardware, not logged-in users. Each device sends
//! a pre-shared key in the `x-kiosk-key` header; the server accepts any
//! key from the configured set. User identity at the kiosk comes from the
//! scanned QR token in the request body, never from this header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// An authenticated kiosk device.
///
/// ```ignore
/// async fn kiosk_only(_device: KioskDevice, ...) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct KioskDevice;

impl FromRequestParts<AppState> for KioskDevice {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get("x-kiosk-key")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing x-kiosk-key header".into()))?;

        if !state.config.kiosk_api_keys.iter().any(|k| k == key) {
            return Err(AppError::Unauthorized("Unknown kiosk device key".into()));
        }

        Ok(KioskDevice)
    }
}
