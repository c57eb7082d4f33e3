pub use sea_orm_migration::prelude::*;

mod m20251101_000001_rink;
mod m20251101_000002_rinkbook_user;
mod m20251101_000003_rinkbook_oauth;
mod m20251101_000004_rink_status;
mod m20251101_000005_rink_booking;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_rink::Migration),
            Box::new(m20251101_000002_rinkbook_user::Migration),
            Box::new(m20251101_000003_rinkbook_oauth::Migration),
            Box::new(m20251101_000004_rink_status::Migration),
            Box::new(m20251101_000005_rink_booking::Migration),
        ]
    }
}
