use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rink::Table)
                    .if_not_exists()
                    .col(pk_auto(Rink::Id))
                    .col(string(Rink::Name))
                    .col(integer(Rink::Capacity))
                    .col(integer(Rink::MaxGroups))
                    .col(integer(Rink::OpenHour))
                    .col(integer(Rink::CloseHour))
                    .col(text_null(Rink::MapLink))
                    .col(timestamp(Rink::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rink::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Rink {
    Table,
    Id,
    Name,
    Capacity,
    MaxGroups,
    OpenHour,
    CloseHour,
    MapLink,
    CreatedAt,
}
