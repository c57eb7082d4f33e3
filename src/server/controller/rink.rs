use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        rink::{CreateRinkDto, CreateStatusDto, RinkDetailDto, RinkDto, StatusDto},
    },
    server::{
        controller::util::get_user::{require_administrator, require_coordinator},
        error::Error,
        model::{app::AppState, session::user::SessionUserId},
        service::rink::RinkService,
    },
};

pub static RINK_TAG: &str = "rink";

/// All rinks with their current status
#[utoipa::path(
    get,
    path = "/api/rinks",
    tag = RINK_TAG,
    responses(
        (status = 200, description = "Rinks ordered by name", body = Vec<RinkDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_rinks(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let rinks = RinkService::new(&state.db, &state.clock).list_rinks().await?;

    Ok((StatusCode::OK, Json(rinks)))
}

/// Creates a rink, administrators only
#[utoipa::path(
    post,
    path = "/api/rinks",
    tag = RINK_TAG,
    request_body = CreateRinkDto,
    responses(
        (status = 201, description = "Rink created", body = RinkDto),
        (status = 400, description = "Invalid hours or capacity", body = ErrorDto),
        (status = 401, description = "No user logged in", body = ErrorDto),
        (status = 403, description = "User is not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_rink(
    State(state): State<AppState>,
    session: Session,
    Json(rink): Json<CreateRinkDto>,
) -> Result<impl IntoResponse, Error> {
    require_administrator(&state, &session).await?;

    let rink = RinkService::new(&state.db, &state.clock)
        .create_rink(rink)
        .await?;

    Ok((StatusCode::CREATED, Json(rink)))
}

/// A rink with today's timeslots
///
/// Anonymous requests are allowed, for a logged-in user the slots they booked are marked.
#[utoipa::path(
    get,
    path = "/api/rinks/{rink_id}",
    tag = RINK_TAG,
    params(("rink_id" = i32, Path, description = "ID of the rink")),
    responses(
        (status = 200, description = "Rink with today's timeslots", body = RinkDetailDto),
        (status = 404, description = "Rink not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_rink(
    State(state): State<AppState>,
    session: Session,
    Path(rink_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user_id = SessionUserId::get(&session).await?;

    let detail = RinkService::new(&state.db, &state.clock)
        .get_rink_detail(rink_id, user_id)
        .await?;

    Ok((StatusCode::OK, Json(detail)))
}

/// Posts a new current status for a rink, coordinators and administrators only
#[utoipa::path(
    post,
    path = "/api/rinks/{rink_id}/status",
    tag = RINK_TAG,
    params(("rink_id" = i32, Path, description = "ID of the rink")),
    request_body = CreateStatusDto,
    responses(
        (status = 201, description = "Status posted", body = StatusDto),
        (status = 400, description = "Empty status state", body = ErrorDto),
        (status = 401, description = "No user logged in", body = ErrorDto),
        (status = 403, description = "User is not a coordinator", body = ErrorDto),
        (status = 404, description = "Rink not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(rink_id): Path<i32>,
    Json(status): Json<CreateStatusDto>,
) -> Result<impl IntoResponse, Error> {
    require_coordinator(&state, &session).await?;

    let status = RinkService::new(&state.db, &state.clock)
        .update_status(rink_id, status)
        .await?;

    Ok((StatusCode::CREATED, Json(status)))
}
