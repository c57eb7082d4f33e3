//! Fixtures for database records and mock HTTP endpoints.
//!
//! - `rink`, `status`, `booking`, `user` insert records into the test database
//! - `oauth` registers mock provider token and user info endpoints
//! - `factory` builds in-memory models for tests that don't touch the database

pub mod booking;
pub mod factory;
pub mod oauth;
pub mod rink;
pub mod status;
pub mod user;
