use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_rink::Rink;

static IDX_STATUS_RINK_ID: &str = "idx-rink_status-rink_id";
static FK_STATUS_RINK_ID: &str = "fk-rink_status-rink_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RinkStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(RinkStatus::Id))
                    .col(integer(RinkStatus::RinkId))
                    .col(boolean(RinkStatus::IsOpen))
                    .col(string(RinkStatus::State))
                    .col(string_null(RinkStatus::Description))
                    .col(timestamp(RinkStatus::StartDate))
                    .col(timestamp_null(RinkStatus::EndDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STATUS_RINK_ID)
                    .table(RinkStatus::Table)
                    .col(RinkStatus::RinkId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STATUS_RINK_ID)
                    .from_tbl(RinkStatus::Table)
                    .from_col(RinkStatus::RinkId)
                    .to_tbl(Rink::Table)
                    .to_col(Rink::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_STATUS_RINK_ID)
                    .table(RinkStatus::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STATUS_RINK_ID)
                    .table(RinkStatus::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RinkStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RinkStatus {
    Table,
    Id,
    RinkId,
    IsOpen,
    State,
    Description,
    StartDate,
    EndDate,
}
