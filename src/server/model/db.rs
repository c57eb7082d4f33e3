//! Database model type aliases.
//!
//! Shorthand for the SeaORM entity models in the `entity` crate.

/// A rink with its capacity and operating hours
pub type RinkModel = entity::rink::Model;

/// A status entry for a rink; the current status is the one without an end date
pub type StatusModel = entity::rink_status::Model;

/// A one-hour booking of a rink by a user
pub type BookingModel = entity::rink_booking::Model;

pub type UserModel = entity::rinkbook_user::Model;

/// Link between a user and an external OAuth provider account
pub type OAuthModel = entity::rinkbook_oauth::Model;

impl From<UserModel> for crate::model::user::UserDto {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            email: user.email,
            rink_id: user.rink_id,
            is_administrator: user.is_administrator,
            is_coordinator: user.is_coordinator,
        }
    }
}
