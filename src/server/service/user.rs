//! User accounts.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserDto,
    server::{
        data::user::UserRepository, error::Error, service::retry::RetryContext,
        util::time::RinkClock,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user, `Ok(None)` if the user does not exist
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();

        ctx.execute_with_retry(&format!("get user ID {}", user_id), |_| {
            let db = db.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);

                Ok(user_repo.get(user_id).await?.map(UserDto::from))
            })
        })
        .await
    }

    /// Finds the user with `email` or creates one, then applies the role flags.
    ///
    /// Used by the testing login, which lets a browser test suite pick its own roles.
    pub async fn upsert_with_roles(
        &self,
        email: &str,
        is_administrator: bool,
        is_coordinator: bool,
        clock: &RinkClock,
    ) -> Result<UserDto, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let email = email.trim().to_lowercase();
        let created_at = clock.now().naive_utc();

        ctx.execute_with_retry(&format!("testing login for {}", email), |_| {
            let db = db.clone();
            let email = email.clone();

            Box::pin(async move {
                let user_repo = UserRepository::new(&db);

                let user = match user_repo.get_by_email(&email).await? {
                    Some(user) => user_repo
                        .update_roles(user.id, is_administrator, is_coordinator)
                        .await?
                        .ok_or_else(|| {
                            Error::InternalError(format!(
                                "User ID {} disappeared while updating roles",
                                user.id
                            ))
                        })?,
                    None => {
                        user_repo
                            .create(&email, is_administrator, is_coordinator, created_at)
                            .await?
                    }
                };

                Ok(UserDto::from(user))
            })
        })
        .await
    }
}
