//! Data transfer objects returned by and accepted from the HTTP API.

pub mod api;
pub mod auth;
pub mod booking;
pub mod rink;
pub mod user;
