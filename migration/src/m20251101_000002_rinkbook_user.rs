use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_rink::Rink;

static FK_USER_RINK_ID: &str = "fk-rinkbook_user-rink_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RinkbookUser::Table)
                    .if_not_exists()
                    .col(pk_auto(RinkbookUser::Id))
                    .col(string_uniq(RinkbookUser::Email))
                    .col(integer_null(RinkbookUser::RinkId))
                    .col(boolean(RinkbookUser::IsAdministrator).default(false))
                    .col(boolean(RinkbookUser::IsCoordinator).default(false))
                    .col(timestamp(RinkbookUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USER_RINK_ID)
                    .from_tbl(RinkbookUser::Table)
                    .from_col(RinkbookUser::RinkId)
                    .to_tbl(Rink::Table)
                    .to_col(Rink::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_USER_RINK_ID)
                    .table(RinkbookUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RinkbookUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RinkbookUser {
    Table,
    Id,
    Email,
    RinkId,
    IsAdministrator,
    IsCoordinator,
    CreatedAt,
}
