use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{TestLoginDto, UserDto},
    },
    server::{
        error::{auth::AuthError, rink::RinkError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::user::UserService,
    },
};

pub static TESTING_TAG: &str = "testing";

/// Creates the user if needed and logs them in, only available with `TESTING` on
///
/// Lets browser tests log in without a real OAuth provider and pick the user's roles.
#[utoipa::path(
    post,
    path = "/testing/api/login",
    tag = TESTING_TAG,
    request_body = TestLoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Testing is disabled or the email is empty", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn testing_login(
    State(state): State<AppState>,
    session: Session,
    Json(login): Json<TestLoginDto>,
) -> Result<impl IntoResponse, Error> {
    if !state.testing {
        return Err(AuthError::TestingDisabled.into());
    }

    if login.email.trim().is_empty() {
        return Err(RinkError::InvalidRequest("Email must not be empty".to_string()).into());
    }

    let user = UserService::new(&state.db)
        .upsert_with_roles(
            &login.email,
            login.is_administrator,
            login.is_coordinator,
            &state.clock,
        )
        .await?;

    SessionUserId::insert(&session, user.id).await?;

    tracing::info!(user_id = %user.id, "Testing login for {}", user.email);

    Ok((StatusCode::OK, Json(user)))
}
