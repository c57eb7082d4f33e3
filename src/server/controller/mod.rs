//! HTTP controller endpoints for the Rinkbook web API.
//!
//! Handlers check the session user at entry, call into the services and map their results
//! to JSON responses. Errors are returned as [`Error`](crate::server::error::Error) and
//! converted by its `IntoResponse` implementation.

pub mod auth;
pub mod booking;
pub mod rink;
pub mod testing;
pub mod util;
