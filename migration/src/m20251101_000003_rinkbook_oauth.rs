use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_rinkbook_user::RinkbookUser;

static IDX_OAUTH_PROVIDER_USER: &str = "idx-rinkbook_oauth-provider-provider_user_id";
static FK_OAUTH_USER_ID: &str = "fk-rinkbook_oauth-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RinkbookOauth::Table)
                    .if_not_exists()
                    .col(pk_auto(RinkbookOauth::Id))
                    .col(string(RinkbookOauth::Provider))
                    .col(string(RinkbookOauth::ProviderUserId))
                    .col(integer(RinkbookOauth::UserId))
                    .col(timestamp(RinkbookOauth::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OAUTH_PROVIDER_USER)
                    .table(RinkbookOauth::Table)
                    .col(RinkbookOauth::Provider)
                    .col(RinkbookOauth::ProviderUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_OAUTH_USER_ID)
                    .from_tbl(RinkbookOauth::Table)
                    .from_col(RinkbookOauth::UserId)
                    .to_tbl(RinkbookUser::Table)
                    .to_col(RinkbookUser::Id)
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
                    .name(FK_OAUTH_USER_ID)
                    .table(RinkbookOauth::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OAUTH_PROVIDER_USER)
                    .table(RinkbookOauth::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RinkbookOauth::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RinkbookOauth {
    Table,
    Id,
    Provider,
    ProviderUserId,
    UserId,
    CreatedAt,
}
