use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("OAuth provider {0:?} is unknown or not enabled")]
    UnknownProvider(String),
    #[error("Failed to exchange authorization code with {provider}: {reason}")]
    TokenExchange { provider: String, reason: String },
    #[error("Failed to fetch user info from {provider}: {reason}")]
    UserInfo { provider: String, reason: String },
    #[error("User info from {0} did not include an email address")]
    MissingEmail(String),
    #[error("User info from {0} did not include a user ID")]
    MissingProviderUserId(String),
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UnknownProvider(_) => {
                tracing::debug!("{}", self);

                error_response(StatusCode::NOT_FOUND, "Login provider not found")
            }
            Self::MissingEmail(_) => {
                tracing::debug!("{}", self);

                error_response(
                    StatusCode::BAD_REQUEST,
                    "Login provider did not share an email address",
                )
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
