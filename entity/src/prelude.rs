pub use super::rink::Entity as Rink;
pub use super::rink_booking::Entity as RinkBooking;
pub use super::rink_status::Entity as RinkStatus;
pub use super::rinkbook_oauth::Entity as RinkbookOauth;
pub use super::rinkbook_user::Entity as RinkbookUser;
