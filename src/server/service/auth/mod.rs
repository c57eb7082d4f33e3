//! OAuth login flow.
//!
//! [`login`] builds the provider authorization URL with a fresh CSRF state, and
//! [`callback::CallbackService`] completes the flow: code exchange, user info fetch and
//! resolution of the provider account to a Rinkbook user.

pub mod callback;
pub mod login;
