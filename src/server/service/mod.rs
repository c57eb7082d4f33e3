//! Service layer.
//!
//! Services hold the business rules: the slot calendar, booking admission, rink and status
//! management, users and the OAuth login flow. They coordinate repositories and wrap
//! database work in [`retry::RetryContext`] so transient failures are retried.

pub mod auth;
pub mod booking;
pub mod calendar;
pub mod retry;
pub mod rink;
pub mod user;
