//! Handlers for the room directory and per-day availability views.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use roomkey_core::availability::{mark_slots, SlotStatus};
use roomkey_core::error::BookingError;
use roomkey_core::types::{DbId, Timestamp};
use roomkey_db::models::reservation::DayOccupant;
use roomkey_db::models::status::ReservationStatus;
use roomkey_db::repositories::{KeyRepo, ReservationRepo, RoomRepo, SectionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Civil date in the deployment timezone, `YYYY-MM-DD`.
    pub date: NaiveDate,
}

/// One room plus its currently issuable key count.
#[derive(Debug, Serialize)]
pub struct RoomListing {
    #[serde(flatten)]
    pub room: roomkey_db::models::room::Room,
    pub available_keys: i64,
}

/// Per-slot availability of one room on one date.
#[derive(Debug, Serialize)]
pub struct AvailabilityView {
    pub room_id: DbId,
    pub date: NaiveDate,
    pub slots: Vec<SlotStatus>,
}

/// GET /api/v1/rooms
///
/// List all active bookable rooms with their available key counts.
pub async fn list_rooms(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let rooms = RoomRepo::list_active(&state.pool).await?;

    let mut listings = Vec::with_capacity(rooms.len());
    for room in rooms {
        let available_keys = KeyRepo::count_available(&state.pool, room.id).await?;
        listings.push(RoomListing {
            room,
            available_keys,
        });
    }

    Ok(Json(DataResponse { data: listings }))
}

/// GET /api/v1/rooms/{room_id}/availability?date=YYYY-MM-DD
///
/// Per-slot free/busy for one room on one civil date. A slot is busy when
/// an occupying reservation or an active-term class meeting overlaps it.
pub async fn get_availability(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Query(query): Query<DateQuery>,
) -> AppResult<impl IntoResponse> {
    ensure_room_exists(&state, room_id).await?;

    let clock = state.config.clock();
    let (day_start, day_end) = clock.day_window(query.date);

    let reservations: Vec<(Timestamp, Timestamp)> =
        ReservationRepo::occupancy_for_window(&state.pool, room_id, day_start, day_end)
            .await?
            .into_iter()
            .map(|r| (r.starts_at, r.ends_at))
            .collect();

    let meetings: Vec<(Timestamp, Timestamp)> =
        SectionRepo::meetings_on(&state.pool, room_id, query.date)
            .await?
            .into_iter()
            .map(|m| clock.slot_window(query.date, m.starts_at, m.ends_at))
            .collect();

    let slots = mark_slots(
        &state.config.catalog(),
        clock,
        query.date,
        &reservations,
        &meetings,
    );

    Ok(Json(DataResponse {
        data: AvailabilityView {
            room_id,
            date: query.date,
            slots,
        },
    }))
}

/// GET /api/v1/rooms/{room_id}/day?date=YYYY-MM-DD
///
/// The full occupancy grid for one room and date: occupying reservations
/// and class meetings, merged and ordered by start time. Class meetings
/// are a read-time projection of the section schedule; they are never
/// stored as reservation rows.
pub async fn get_day_grid(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Query(query): Query<DateQuery>,
) -> AppResult<impl IntoResponse> {
    ensure_room_exists(&state, room_id).await?;

    let clock = state.config.clock();
    let (day_start, day_end) = clock.day_window(query.date);

    let mut occupants: Vec<DayOccupant> =
        ReservationRepo::occupancy_for_window(&state.pool, room_id, day_start, day_end)
            .await?
            .into_iter()
            .map(|r| DayOccupant {
                kind: "RESERVATION",
                reservation_id: Some(r.id),
                label: r.slot_label,
                starts_at: r.starts_at,
                ends_at: r.ends_at,
                status: ReservationStatus::name_of(r.status_id),
            })
            .collect();

    for meeting in SectionRepo::meetings_on(&state.pool, room_id, query.date).await? {
        let (starts_at, ends_at) = clock.slot_window(query.date, meeting.starts_at, meeting.ends_at);
        occupants.push(DayOccupant {
            kind: "IN_CLASS",
            reservation_id: None,
            label: format!("{} {}", meeting.course_code, meeting.course_title),
            starts_at,
            ends_at,
            status: "in_class",
        });
    }

    occupants.sort_by_key(|o| o.starts_at);

    Ok(Json(DataResponse { data: occupants }))
}

/// 404 unless the room exists and is active.
pub(crate) async fn ensure_room_exists(state: &AppState, room_id: DbId) -> Result<(), AppError> {
    let room = RoomRepo::find_by_id(&state.pool, room_id).await?;
    match room {
        Some(room) if room.is_active => Ok(()),
        _ => Err(BookingError::NotFound { entity: "Room" }.into()),
    }
}
