//! SeaORM entities for the rinkbook schema.

pub mod prelude;

pub mod rink;
pub mod rink_booking;
pub mod rink_status;
pub mod rinkbook_oauth;
pub mod rinkbook_user;
