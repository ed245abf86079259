//! Handlers for the unattended key kiosk.
//!
//! The kiosk authenticates itself with a device key and identifies the
//! person in front of it by a scanned short-lived QR token. The raw token
//! is verified and discarded; it is never logged or stored.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use roomkey_core::error::BookingError;
use roomkey_core::types::DbId;
use roomkey_db::models::reservation::ReservationSummary;
use roomkey_db::models::status::ReservationStatus;
use roomkey_db::repositories::{CustodyRepo, ReservationRepo};

use crate::auth::qr;
use crate::error::{AppError, AppResult};
use crate::middleware::kiosk::KioskDevice;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct KioskLookupRequest {
    pub qr_token: String,
}

#[derive(Debug, Deserialize)]
pub struct KioskActionRequest {
    pub qr_token: String,
    /// When omitted, the earliest matching reservation today is used.
    pub reservation_id: Option<DbId>,
}

/// What the scanned user can do right now.
#[derive(Debug, Serialize)]
pub struct KioskLookupView {
    pub user_id: DbId,
    /// Earliest Approved reservation today, eligible for check-in.
    pub check_in: Option<ReservationSummary>,
    /// Earliest CheckedIn reservation today, eligible for key return.
    pub return_key: Option<ReservationSummary>,
}

/// POST /api/v1/kiosk/lookup
///
/// Resolve a scanned token to today's actionable reservations.
pub async fn lookup(
    _device: KioskDevice,
    State(state): State<AppState>,
    Json(input): Json<KioskLookupRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = verify_scan(&state, &input.qr_token)?;
    let (day_start, day_end) = today_window(&state);

    let check_in = ReservationRepo::earliest_for_user_in_window(
        &state.pool,
        user_id,
        ReservationStatus::Approved,
        day_start,
        day_end,
    )
    .await?;
    let return_key = ReservationRepo::earliest_for_user_in_window(
        &state.pool,
        user_id,
        ReservationStatus::CheckedIn,
        day_start,
        day_end,
    )
    .await?;

    Ok(Json(DataResponse {
        data: KioskLookupView {
            user_id,
            check_in,
            return_key,
        },
    }))
}

/// POST /api/v1/kiosk/check-in
///
/// Issue a key for an approved reservation. The response carries the key
/// code so the kiosk can light the matching cabinet slot.
pub async fn check_in(
    _device: KioskDevice,
    State(state): State<AppState>,
    Json(input): Json<KioskActionRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = verify_scan(&state, &input.qr_token)?;

    let reservation_id = match input.reservation_id {
        Some(id) => id,
        None => best_match(
            &state,
            user_id,
            ReservationStatus::Approved,
            BookingError::NoMatchingCheckinReservationToday,
        )
        .await?,
    };

    let receipt = CustodyRepo::check_in(&state.pool, reservation_id, user_id).await?;
    Ok(Json(DataResponse { data: receipt }))
}

/// POST /api/v1/kiosk/return
///
/// Take a key back and complete the reservation.
pub async fn return_key(
    _device: KioskDevice,
    State(state): State<AppState>,
    Json(input): Json<KioskActionRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = verify_scan(&state, &input.qr_token)?;

    let reservation_id = match input.reservation_id {
        Some(id) => id,
        None => best_match(
            &state,
            user_id,
            ReservationStatus::CheckedIn,
            BookingError::NoMatchingReturnReservationToday,
        )
        .await?,
    };

    let loan = CustodyRepo::return_key(&state.pool, reservation_id, user_id).await?;
    Ok(Json(DataResponse { data: loan }))
}

/// Verify a scanned QR token, mapping rejections to `BAD_QR_TOKEN`.
fn verify_scan(state: &AppState, token: &str) -> Result<DbId, AppError> {
    qr::verify(token, &state.config.qr)
        .map_err(|reason| AppError::Domain(BookingError::BadQrToken(reason)))
}

fn today_window(state: &AppState) -> (roomkey_core::types::Timestamp, roomkey_core::types::Timestamp) {
    let clock = state.config.clock();
    let today = clock.civil_date(Utc::now());
    clock.day_window(today)
}

/// Earliest reservation today in `status` where the user is a member.
async fn best_match(
    state: &AppState,
    user_id: DbId,
    status: ReservationStatus,
    miss: BookingError,
) -> Result<DbId, AppError> {
    let (day_start, day_end) = today_window(state);
    let summary = ReservationRepo::earliest_for_user_in_window(
        &state.pool,
        user_id,
        status,
        day_start,
        day_end,
    )
    .await?;
    summary.map(|s| s.id).ok_or(AppError::Domain(miss))
}
