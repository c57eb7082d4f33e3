use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{OAuthModel, UserModel},
    TestContext,
};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { test: self }
    }
}

pub struct UserFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert a user without any roles
    pub async fn insert_user(&self, email: &str) -> Result<UserModel, TestError> {
        self.insert_user_with_roles(email, false, false).await
    }

    pub async fn insert_user_with_roles(
        &self,
        email: &str,
        is_administrator: bool,
        is_coordinator: bool,
    ) -> Result<UserModel, TestError> {
        Ok(
            entity::prelude::RinkbookUser::insert(entity::rinkbook_user::ActiveModel {
                email: ActiveValue::Set(email.to_lowercase()),
                rink_id: ActiveValue::Set(None),
                is_administrator: ActiveValue::Set(is_administrator),
                is_coordinator: ActiveValue::Set(is_coordinator),
                created_at: ActiveValue::Set(self.test.now.naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Link a user to an account at an OAuth provider
    pub async fn insert_oauth_link(
        &self,
        user_id: i32,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<OAuthModel, TestError> {
        Ok(
            entity::prelude::RinkbookOauth::insert(entity::rinkbook_oauth::ActiveModel {
                provider: ActiveValue::Set(provider.to_string()),
                provider_user_id: ActiveValue::Set(provider_user_id.to_string()),
                user_id: ActiveValue::Set(user_id),
                created_at: ActiveValue::Set(self.test.now.naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
