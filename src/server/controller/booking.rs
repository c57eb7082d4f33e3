use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        booking::{BookingDto, BookingRequestDto},
    },
    server::{
        controller::util::get_user::require_user,
        error::Error,
        model::app::AppState,
        service::{
            booking::{booking_to_dto, BookingService},
            rink::rink_to_dto,
        },
    },
};

pub static BOOKING_TAG: &str = "booking";

/// Books an hour of today at a rink for the logged-in user
///
/// The request is rejected if the rink doesn't exist, the timeslot is full, the user already
/// holds an overlapping booking today or the user reached the daily booking limit.
#[utoipa::path(
    post,
    path = "/rink/book",
    tag = BOOKING_TAG,
    request_body = BookingRequestDto,
    responses(
        (status = 200, description = "Timeslot booked", body = BookingDto),
        (status = 400, description = "Hour or group size out of range", body = ErrorDto),
        (status = 401, description = "No user logged in", body = ErrorDto),
        (status = 403, description = "Timeslot already booked by the user or daily limit reached", body = ErrorDto),
        (status = 404, description = "Rink not found", body = ErrorDto),
        (status = 409, description = "Timeslot is full", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn book(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<BookingRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&state, &session).await?;

    let (booking, rink, status) =
        BookingService::new(&state.db, &state.clock, state.max_bookings_per_day)
            .request_booking(request.rink_id, user.id, request.hour, request.group_size)
            .await?;

    let rink = rink_to_dto(rink, status, &state.clock);

    Ok((
        StatusCode::OK,
        Json(booking_to_dto(booking, rink, user, &state.clock)),
    ))
}

/// The logged-in user's bookings today at every rink
#[utoipa::path(
    get,
    path = "/api/user/bookings",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Bookings ordered by start", body = Vec<BookingDto>),
        (status = 401, description = "No user logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_bookings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&state, &session).await?;

    let bookings = BookingService::new(&state.db, &state.clock, state.max_bookings_per_day)
        .get_user_bookings_today(user.id)
        .await?;

    let bookings: Vec<BookingDto> = bookings
        .into_iter()
        .map(|(booking, rink, status)| {
            let rink = rink_to_dto(rink, status, &state.clock);

            booking_to_dto(booking, rink, user.clone(), &state.clock)
        })
        .collect();

    Ok((StatusCode::OK, Json(bookings)))
}
