//! Database model type aliases matching those used by the server.

pub type RinkModel = entity::rink::Model;

pub type StatusModel = entity::rink_status::Model;

pub type BookingModel = entity::rink_booking::Model;

pub type UserModel = entity::rinkbook_user::Model;

pub type OAuthModel = entity::rinkbook_oauth::Model;
