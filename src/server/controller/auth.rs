use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        auth::{ProviderKind, ProvidersDto},
        user::UserDto,
    },
    server::{
        controller::util::{csrf::validate_csrf, get_user::get_user_from_session},
        error::{oauth::OAuthError, Error},
        model::{
            app::AppState,
            auth::OAuthProvider,
            session::{auth::SessionAuthCsrf, user::SessionUserId},
        },
        service::auth::{callback::CallbackService, login::login_service},
    },
};

pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

/// Enabled provider matching the route's provider name
fn enabled_provider<'a>(state: &'a AppState, name: &str) -> Result<&'a OAuthProvider, Error> {
    ProviderKind::from_name(name)
        .and_then(|kind| state.providers.get(kind))
        .ok_or_else(|| OAuthError::UnknownProvider(name.to_string()).into())
}

/// Lists the OAuth providers users can log in with
#[utoipa::path(
    get,
    path = "/api/auth/providers",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Enabled login providers", body = ProvidersDto),
    ),
)]
pub async fn providers(State(state): State<AppState>) -> impl IntoResponse {
    Json(ProvidersDto {
        providers: state.providers.enabled(),
    })
}

/// Login route redirecting the user to the provider's authorization page
///
/// Stores a CSRF state in session which the provider echoes back to the callback.
#[utoipa::path(
    get,
    path = "/login/{provider}",
    tag = AUTH_TAG,
    params(("provider" = String, Path, description = "google, github or facebook")),
    responses(
        (status = 307, description = "Redirect to the provider's login page"),
        (status = 404, description = "Provider unknown or not enabled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let provider = enabled_provider(&state, &provider)?;

    let login = login_service(provider);

    SessionAuthCsrf::insert(&session, &login.state).await?;

    Ok(Redirect::temporary(&login.login_url))
}

/// Callback route the provider redirects to after the user authorizes Rinkbook
///
/// Exchanges the authorization code, resolves the provider account to a user and logs
/// them in.
#[utoipa::path(
    get,
    path = "/login/{provider}/authorized",
    tag = AUTH_TAG,
    params(
        ("provider" = String, Path, description = "google, github or facebook"),
        ("state" = String, Query, description = "CSRF state issued by the login route"),
        ("code" = String, Query, description = "Authorization code"),
    ),
    responses(
        (status = 307, description = "Logged in, redirect to the home page"),
        (status = 400, description = "CSRF mismatch or the provider shared no email", body = ErrorDto),
        (status = 404, description = "Provider unknown or not enabled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Path(provider): Path<String>,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    let provider = enabled_provider(&state, &provider)?;

    validate_csrf(&session, &params.0.state).await?;

    let user = CallbackService::new(&state.db, &state.http_client, &state.clock)
        .handle_callback(provider, &params.0.code)
        .await?;

    session.cycle_id().await?;
    SessionUserId::insert(&session, user.id).await?;

    Ok(Redirect::temporary("/"))
}

/// Logs the user out by clearing their session
#[utoipa::path(
    get,
    path = "/logout",
    tag = AUTH_TAG,
    responses(
        (status = 307, description = "Logged out, redirect to the home page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    if let Some(user_id) = SessionUserId::get(&session).await? {
        session.clear().await;

        tracing::info!(user_id = %user_id, "User logged out");
    }

    Ok(Redirect::temporary("/"))
}

/// Returns the logged-in user
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged-in user", body = UserDto),
        (status = 401, description = "No user logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(user)))
}
