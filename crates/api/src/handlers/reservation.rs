//! Handlers for the reservation lifecycle: create, list, view, decide,
//! cancel.
//!
//! Creation applies the booking rules in a fixed order so rejected requests
//! carry a deterministic error code: date window, slot selection, room
//! existence, reservation occupancy, class-schedule conflict, then the
//! participant rules. The repository re-checks occupancy inside the
//! booking transaction as the race-safe authority.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use roomkey_core::availability::overlaps;
use roomkey_core::booking::{
    resolve_slot_selection, validate_date_window, validate_participants,
};
use roomkey_core::error::BookingError;
use roomkey_core::roles::auto_approves;
use roomkey_core::types::DbId;
use roomkey_db::models::reservation::{CreateReservation, DecisionAction, Reservation};
use roomkey_db::models::status::{ReservationStatus, StatusId};
use roomkey_db::repositories::{ReservationRepo, SectionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::room::ensure_room_exists;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub room_id: DbId,
    /// Civil date in the deployment timezone, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Canonical slot ids, e.g. `["A1", "A2"]`. At most two, adjacent.
    pub slot_ids: Vec<String>,
    /// Other members of the group, excluding the requester.
    #[serde(default)]
    pub participant_ids: Vec<DbId>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DecideRequest {
    pub action: DecisionAction,
}

/// A reservation with its status name and participant list resolved.
#[derive(Debug, Serialize)]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub status: &'static str,
    pub participant_ids: Vec<DbId>,
}

/// POST /api/v1/reservations
///
/// Place a reservation. Student requests start Pending; teacher and admin
/// requests are approved on creation.
pub async fn create_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReservationRequest>,
) -> AppResult<impl IntoResponse> {
    let clock = state.config.clock();
    let now = Utc::now();

    validate_date_window(
        input.date,
        clock.civil_date(now),
        state.config.booking_window_days,
    )
    .map_err(AppError::from)?;

    let selection = resolve_slot_selection(&state.config.catalog(), &input.slot_ids)?;
    let (starts_at, ends_at) = clock.slot_window(input.date, selection.start, selection.end);

    ensure_room_exists(&state, input.room_id).await?;

    // Availability is checked with reservations before class meetings, and
    // before the participant rules, so a multi-fault request reports the
    // highest-precedence failure. This read is advisory; the transactional
    // re-check in `create_booked` stays the race-safe authority.
    let occupied =
        ReservationRepo::occupancy_for_window(&state.pool, input.room_id, starts_at, ends_at)
            .await?;
    if !occupied.is_empty() {
        return Err(BookingError::RoomAlreadyReserved.into());
    }

    // Class meetings are not reservation rows, so the transactional
    // occupancy re-check cannot see them. They change only by admin edits
    // to the section schedule, so checking outside the transaction is safe.
    let meetings = SectionRepo::meetings_on(&state.pool, input.room_id, input.date).await?;
    for meeting in &meetings {
        let (m_start, m_end) = clock.slot_window(input.date, meeting.starts_at, meeting.ends_at);
        if overlaps(starts_at, ends_at, m_start, m_end) {
            return Err(BookingError::ConflictWithClassSchedule.into());
        }
    }

    validate_participants(auth.user_id, &input.participant_ids)?;

    let status_id: StatusId = if auto_approves(&auth.role) {
        ReservationStatus::Approved.id()
    } else {
        ReservationStatus::Pending.id()
    };

    let reservation = ReservationRepo::create_booked(
        &state.pool,
        &CreateReservation {
            room_id: input.room_id,
            requester_id: auth.user_id,
            slot_label: selection.label,
            starts_at,
            ends_at,
            note: input.note,
            status_id,
            participant_ids: input.participant_ids.clone(),
        },
    )
    .await?;

    tracing::info!(
        reservation_id = reservation.id,
        room_id = reservation.room_id,
        requester_id = auth.user_id,
        status = ReservationStatus::name_of(reservation.status_id),
        "Reservation created"
    );

    let view = ReservationView {
        status: ReservationStatus::name_of(reservation.status_id),
        participant_ids: input.participant_ids,
        reservation,
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/reservations/mine
///
/// The caller's own reservations, newest first.
pub async fn my_reservations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reservations = ReservationRepo::list_for_requester(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: reservations }))
}

/// GET /api/v1/reservations/{id}
///
/// Reservation detail. Visible to the requester, its participants, and
/// staff; anyone else gets 403.
pub async fn get_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = ReservationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(BookingError::NotFound {
            entity: "Reservation",
        })?;
    let participant_ids = ReservationRepo::participant_ids(&state.pool, id).await?;

    let is_member =
        reservation.requester_id == auth.user_id || participant_ids.contains(&auth.user_id);
    if !is_member && !roomkey_core::roles::can_decide(&auth.role) {
        return Err(BookingError::NotOwner.into());
    }

    let view = ReservationView {
        status: ReservationStatus::name_of(reservation.status_id),
        participant_ids,
        reservation,
    };
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/reservations/{id}/decide
///
/// Approve or reject a pending reservation. Staff only.
pub async fn decide_reservation(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecideRequest>,
) -> AppResult<impl IntoResponse> {
    let reservation =
        ReservationRepo::decide(&state.pool, id, user.user_id, input.action).await?;

    tracing::info!(
        reservation_id = id,
        approver_id = user.user_id,
        status = ReservationStatus::name_of(reservation.status_id),
        "Reservation decided"
    );

    Ok(Json(DataResponse { data: reservation }))
}

/// POST /api/v1/reservations/{id}/cancel
///
/// Cancel a Pending or Approved reservation as its requester, up to 60
/// minutes before the start.
pub async fn cancel_reservation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reservation = ReservationRepo::cancel(&state.pool, id, auth.user_id, Utc::now()).await?;

    tracing::info!(
        reservation_id = id,
        requester_id = auth.user_id,
        "Reservation cancelled"
    );

    Ok(Json(DataResponse { data: reservation }))
}
