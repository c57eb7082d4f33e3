//! Rinkbook: timeslot booking for municipal outdoor rinks.
//!
//! `model` holds the JSON data transfer objects exchanged with API consumers, `server` holds
//! the axum application: configuration, persistence, the booking services and HTTP routing.

pub mod model;
pub mod server;
