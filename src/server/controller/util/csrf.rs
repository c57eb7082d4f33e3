use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::session::auth::SessionAuthCsrf,
};

/// Validate that the session CSRF state exists and matches `state`.
///
/// The stored state is removed so it can't be replayed.
pub async fn validate_csrf(session: &Session, csrf_state: &str) -> Result<(), Error> {
    let stored_state = SessionAuthCsrf::remove(session).await?;

    if let Some(state) = stored_state {
        if state == csrf_state {
            return Ok(());
        }
    }

    Err(Error::AuthError(AuthError::CsrfValidationFailed))
}
