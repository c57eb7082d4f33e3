use sea_orm::{DbErr, RuntimeErr};

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient failures)
    Retry,
    /// Failed permanently (bad request, admission rejection, bug)
    Fail,
}

/// SQLSTATE of a Postgres serialization conflict under SERIALIZABLE isolation
const SERIALIZATION_FAILURE: &str = "40001";

fn is_serialization_failure(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(err)) | DbErr::Query(RuntimeErr::SqlxError(err)) => err
            .as_database_error()
            .and_then(|d| d.code().map(|c| c == SERIALIZATION_FAILURE))
            .unwrap_or(false),
        _ => false,
    }
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Concurrent booking transactions touching the same timeslot
                err if is_serialization_failure(err) => ErrorRetryStrategy::Retry,
                _ => ErrorRetryStrategy::Fail,
            },

            // Could be Redis connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            Self::HttpError(err) => {
                if err.status().is_some_and(|s| s.is_client_error()) {
                    ErrorRetryStrategy::Fail
                } else {
                    ErrorRetryStrategy::Retry
                }
            }

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::AuthError(_) => ErrorRetryStrategy::Fail,
            Self::OAuthError(_) => ErrorRetryStrategy::Fail,
            Self::RinkError(_) => ErrorRetryStrategy::Fail,
            Self::ParseError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
            Self::UrlParseError(_) => ErrorRetryStrategy::Fail,
            Self::IoError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
