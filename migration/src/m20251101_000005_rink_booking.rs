use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_rink::Rink, m20251101_000002_rinkbook_user::RinkbookUser};

static IDX_BOOKING_RINK_START: &str = "idx-rink_booking-rink_id-start_date";
static IDX_BOOKING_USER_START: &str = "idx-rink_booking-user_id-start_date";
static IDX_BOOKING_UNIQUE_SLOT: &str = "idx-rink_booking-rink_id-user_id-start_date";
static FK_BOOKING_RINK_ID: &str = "fk-rink_booking-rink_id";
static FK_BOOKING_USER_ID: &str = "fk-rink_booking-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RinkBooking::Table)
                    .if_not_exists()
                    .col(pk_auto(RinkBooking::Id))
                    .col(integer(RinkBooking::RinkId))
                    .col(integer(RinkBooking::UserId))
                    .col(timestamp(RinkBooking::StartDate))
                    .col(timestamp(RinkBooking::EndDate))
                    .col(integer(RinkBooking::GroupSize).default(1))
                    .col(timestamp(RinkBooking::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BOOKING_RINK_START)
                    .table(RinkBooking::Table)
                    .col(RinkBooking::RinkId)
                    .col(RinkBooking::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BOOKING_USER_START)
                    .table(RinkBooking::Table)
                    .col(RinkBooking::UserId)
                    .col(RinkBooking::StartDate)
                    .to_owned(),
            )
            .await?;

        // Rejects a concurrent double-submit of the same slot by the same user
        manager
            .create_index(
                Index::create()
                    .name(IDX_BOOKING_UNIQUE_SLOT)
                    .table(RinkBooking::Table)
                    .col(RinkBooking::RinkId)
                    .col(RinkBooking::UserId)
                    .col(RinkBooking::StartDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BOOKING_RINK_ID)
                    .from_tbl(RinkBooking::Table)
                    .from_col(RinkBooking::RinkId)
                    .to_tbl(Rink::Table)
                    .to_col(Rink::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BOOKING_USER_ID)
                    .from_tbl(RinkBooking::Table)
                    .from_col(RinkBooking::UserId)
                    .to_tbl(RinkbookUser::Table)
                    .to_col(RinkbookUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [FK_BOOKING_USER_ID, FK_BOOKING_RINK_ID] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(RinkBooking::Table)
                        .to_owned(),
                )
                .await?;
        }

        for idx in [
            IDX_BOOKING_UNIQUE_SLOT,
            IDX_BOOKING_USER_START,
            IDX_BOOKING_RINK_START,
        ] {
            manager
                .drop_index(Index::drop().name(idx).table(RinkBooking::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(RinkBooking::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RinkBooking {
    Table,
    Id,
    RinkId,
    UserId,
    StartDate,
    EndDate,
    GroupSize,
    CreatedAt,
}
