//! Helpers shared by controllers: CSRF validation for the OAuth callback and the
//! session user checks run at handler entry.

pub mod csrf;
pub mod get_user;
