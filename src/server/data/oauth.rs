use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct OAuthRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OAuthRepository<'a, C> {
    /// Creates a new instance of [`OAuthRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Links an account at `provider` to a user
    pub async fn create(
        &self,
        user_id: i32,
        provider: &str,
        provider_user_id: &str,
        created_at: NaiveDateTime,
    ) -> Result<entity::rinkbook_oauth::Model, DbErr> {
        let link = entity::rinkbook_oauth::ActiveModel {
            provider: ActiveValue::Set(provider.to_string()),
            provider_user_id: ActiveValue::Set(provider_user_id.to_string()),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        };

        link.insert(self.db).await
    }

    /// Finds the link for a provider account along with its user
    pub async fn get_with_user(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<
        Option<(
            entity::rinkbook_oauth::Model,
            Option<entity::rinkbook_user::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::RinkbookOauth::find()
            .find_also_related(entity::rinkbook_user::Entity)
            .filter(entity::rinkbook_oauth::Column::Provider.eq(provider))
            .filter(entity::rinkbook_oauth::Column::ProviderUserId.eq(provider_user_id))
            .one(self.db)
            .await
    }
}
