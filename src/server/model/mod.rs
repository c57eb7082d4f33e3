//! Server application models and type definitions.
//!
//! Application state, database model type aliases, configured OAuth providers, calendar
//! timeslots and session data structures shared between controllers and services.

pub mod app;
pub mod auth;
pub mod calendar;
pub mod db;
pub mod session;
