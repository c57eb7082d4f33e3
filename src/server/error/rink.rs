use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Rink lookup and booking admission errors.
///
/// The admission variants are ordered the way they are checked: a missing rink first,
/// then a full timeslot, then a duplicate booking for the day, then the daily quota.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RinkError {
    #[error("Rink ID {0} not found")]
    RinkNotFound(i32),
    #[error("Timeslot at hour {hour} for rink ID {rink_id} is full")]
    SlotFull { rink_id: i32, hour: u32 },
    #[error("User already booked hour {hour} today")]
    AlreadyBooked { hour: u32 },
    #[error("User reached the limit of {limit} bookings today")]
    QuotaExceeded { limit: u32 },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for RinkError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::RinkNotFound(_) => error_response(StatusCode::NOT_FOUND, "Rink not found"),
            Self::SlotFull { .. } => error_response(StatusCode::CONFLICT, "Timeslot booked already"),
            Self::AlreadyBooked { .. } => {
                error_response(StatusCode::FORBIDDEN, "Have already booked this timeslot")
            }
            Self::QuotaExceeded { .. } => {
                error_response(StatusCode::FORBIDDEN, "Have booked too many timeslots today")
            }
            Self::InvalidRequest(reason) => error_response(StatusCode::BAD_REQUEST, reason),
        }
    }
}
