use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user, the email is stored lowercased
    pub async fn create(
        &self,
        email: &str,
        is_administrator: bool,
        is_coordinator: bool,
        created_at: NaiveDateTime,
    ) -> Result<entity::rinkbook_user::Model, DbErr> {
        let user = entity::rinkbook_user::ActiveModel {
            email: ActiveValue::Set(email.to_lowercase()),
            rink_id: ActiveValue::Set(None),
            is_administrator: ActiveValue::Set(is_administrator),
            is_coordinator: ActiveValue::Set(is_coordinator),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::rinkbook_user::Model>, DbErr> {
        entity::prelude::RinkbookUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Case-insensitive lookup by email
    pub async fn get_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::rinkbook_user::Model>, DbErr> {
        entity::prelude::RinkbookUser::find()
            .filter(entity::rinkbook_user::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await
    }

    /// Overwrites the role flags of a user, `Ok(None)` if the user doesn't exist
    pub async fn update_roles(
        &self,
        user_id: i32,
        is_administrator: bool,
        is_coordinator: bool,
    ) -> Result<Option<entity::rinkbook_user::Model>, DbErr> {
        let Some(user) = entity::prelude::RinkbookUser::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut user_am = user.into_active_model();
        user_am.is_administrator = ActiveValue::Set(is_administrator);
        user_am.is_coordinator = ActiveValue::Set(is_coordinator);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}
