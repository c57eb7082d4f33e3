//! Error types for the Rinkbook server application.
//!
//! Each domain (authentication, OAuth providers, rinks and bookings, configuration) has its
//! own error enum with an `IntoResponse` mapping. They are aggregated into [`Error`], which
//! also wraps the external library errors so handlers and services can use `?` throughout.

pub mod auth;
pub mod config;
pub mod oauth;
pub mod retry;
pub mod rink;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, oauth::OAuthError, rink::RinkError},
};

/// Main error type for the Rinkbook server application.
///
/// Aggregates the domain error types and external library errors into a single type.
/// `#[from]` conversions allow propagation with `?`, and the `IntoResponse` implementation
/// maps each error to the HTTP response API consumers receive.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, CSRF, permissions).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// OAuth provider error (unknown provider, token exchange, user info).
    #[error(transparent)]
    OAuthError(#[from] OAuthError),
    /// Rink and booking error (missing rink, admission rejections, invalid input).
    #[error(transparent)]
    RinkError(#[from] RinkError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Rinkbook's code.
    #[error("Internal error with Rinkbook's code, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// HTTP client error while building the client or calling a provider.
    #[error(transparent)]
    HttpError(#[from] oauth2::reqwest::Error),
    /// Invalid provider endpoint or redirect URL.
    #[error(transparent)]
    UrlParseError(#[from] oauth2::url::ParseError),
    /// Socket error while binding or serving.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::OAuthError(err) => err.into_response(),
            Self::RinkError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged while the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

/// Builds a JSON error response with the provided status and message
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}
