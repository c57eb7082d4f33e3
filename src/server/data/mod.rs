//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries per table and are generic over [`sea_orm::ConnectionTrait`]
//! so the same code runs against the connection pool or inside a transaction.

pub mod booking;
pub mod oauth;
pub mod rink;
pub mod status;
pub mod user;
