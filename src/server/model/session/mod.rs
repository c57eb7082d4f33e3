//! Session data models and utilities.
//!
//! Type-safe wrappers for the values Rinkbook keeps in the tower-sessions store: the CSRF
//! state of an in-flight OAuth login and the ID of the logged-in user.

pub mod auth;
pub mod user;
