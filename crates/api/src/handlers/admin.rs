//! Admin maintenance handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use roomkey_core::error::BookingError;
use roomkey_core::types::DbId;
use roomkey_db::models::status::KeyStatus;
use roomkey_db::repositories::{KeyRepo, ReservationRepo, TermRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a manual no-show sweep.
#[derive(Debug, Serialize)]
pub struct SweepResult {
    /// Approved reservations transitioned to NoShow.
    pub swept: u64,
    /// Terms deactivated because their end date has passed.
    pub terms_deactivated: u64,
}

#[derive(Debug, Deserialize)]
pub struct SetKeyStatusRequest {
    /// Target key status: `available`, `lost`, or `damaged`.
    pub status: String,
}

/// POST /api/v1/admin/sweep-no-shows
///
/// Run the no-show sweep immediately instead of waiting for the background
/// interval. Idempotent.
pub async fn sweep_no_shows(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let swept = ReservationRepo::sweep_no_shows(&state.pool, now).await?;

    let clock = state.config.clock();
    let terms_deactivated = TermRepo::deactivate_elapsed(&state.pool, clock.civil_date(now)).await?;

    tracing::info!(
        admin_id = user.user_id,
        swept,
        terms_deactivated,
        "Manual no-show sweep"
    );

    Ok(Json(DataResponse {
        data: SweepResult {
            swept,
            terms_deactivated,
        },
    }))
}

/// POST /api/v1/admin/keys/{key_id}/status
///
/// Override a key's status, e.g. marking a never-returned key `lost` or a
/// returned key `damaged`. `borrowed` is owned by the custody engine and
/// cannot be set here.
pub async fn set_key_status(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(key_id): Path<DbId>,
    Json(input): Json<SetKeyStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = match input.status.as_str() {
        "available" => KeyStatus::Available,
        "lost" => KeyStatus::Lost,
        "damaged" => KeyStatus::Damaged,
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown key status: {other}"
            )))
        }
    };

    let key = KeyRepo::set_status(&state.pool, key_id, status.id())
        .await?
        .ok_or(BookingError::NotFound { entity: "Key" })?;

    tracing::info!(
        admin_id = user.user_id,
        key_id,
        status = %input.status,
        "Key status overridden"
    );

    Ok(Json(DataResponse {
        data: json!({ "key": key }),
    }))
}
