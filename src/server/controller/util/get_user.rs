use tower_sessions::Session;

use crate::{
    model::user::UserDto,
    server::{
        error::{auth::AuthError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::user::UserService,
    },
};

/// Retrieves user information from session and then from database
///
/// # Returns
/// - `Ok(UserDto)`: User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: No user ID in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID in session but not in
///   the database, the session is cleared
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserService::new(&state.db).get_user(user_id).await? else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

/// Logged-in user, 401 for anonymous requests
pub async fn require_user(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    get_user_from_session(state, session).await
}

/// Logged-in user holding the coordinator or administrator role
pub async fn require_coordinator(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    let user = require_user(state, session).await?;

    if !(user.is_coordinator || user.is_administrator) {
        return Err(AuthError::CoordinatorRequired(user.id).into());
    }

    Ok(user)
}

/// Logged-in user holding the administrator role
pub async fn require_administrator(
    state: &AppState,
    session: &Session,
) -> Result<UserDto, Error> {
    let user = require_user(state, session).await?;

    if !user.is_administrator {
        return Err(AuthError::AdministratorRequired(user.id).into());
    }

    Ok(user)
}
