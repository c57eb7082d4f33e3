use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,
    #[error("Failed to login user due to CSRF state present in session store but without a value")]
    CsrfMissingValue,
    #[error("User ID {0:?} attempted a coordinator action without permission")]
    CoordinatorRequired(i32),
    #[error("User ID {0:?} attempted an administrator action without permission")]
    AdministratorRequired(i32),
    #[error("Testing login requested while testing mode is disabled")]
    TestingDisabled,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, "API requires logged-in user")
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                error_response(StatusCode::UNAUTHORIZED, "API requires logged-in user")
            }
            Self::CsrfValidationFailed => {
                tracing::debug!("{}", self);

                error_response(
                    StatusCode::BAD_REQUEST,
                    "There was an issue logging you in, please try again.",
                )
            }
            Self::CoordinatorRequired(user_id) | Self::AdministratorRequired(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                error_response(StatusCode::FORBIDDEN, "Permission denied")
            }
            Self::TestingDisabled => error_response(StatusCode::BAD_REQUEST, "Testing feature not on"),
            Self::CsrfMissingValue => InternalServerError(self).into_response(),
        }
    }
}
