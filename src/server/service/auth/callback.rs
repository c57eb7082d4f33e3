use oauth2::{reqwest, AuthorizationCode, TokenResponse};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;

use crate::{
    model::{auth::ProviderKind, user::UserDto},
    server::{
        data::{oauth::OAuthRepository, user::UserRepository},
        error::{oauth::OAuthError, Error},
        model::auth::OAuthProvider,
        service::retry::RetryContext,
        util::time::RinkClock,
    },
};

/// Identity reported by a provider's user info endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider_user_id: String,
    pub email: String,
}

/// Extracts the account ID and email from a user info response.
///
/// Providers report the ID as a string (Google, Facebook) or a number (GitHub).
pub fn parse_profile(kind: ProviderKind, user_info: &Value) -> Result<ProviderProfile, OAuthError> {
    let provider_user_id = match user_info.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(OAuthError::MissingProviderUserId(kind.to_string())),
    };

    let email = user_info
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or_else(|| OAuthError::MissingEmail(kind.to_string()))?;

    Ok(ProviderProfile {
        provider_user_id,
        email: email.to_lowercase(),
    })
}

pub struct CallbackService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    clock: &'a RinkClock,
}

impl<'a> CallbackService<'a> {
    /// Creates a new instance of [`CallbackService`]
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        clock: &'a RinkClock,
    ) -> Self {
        Self {
            db,
            http_client,
            clock,
        }
    }

    /// Completes a login: exchanges the authorization code, fetches the user's profile and
    /// resolves it to a user.
    pub async fn handle_callback(
        &self,
        provider: &OAuthProvider,
        code: &str,
    ) -> Result<UserDto, Error> {
        let token = provider
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(self.http_client)
            .await
            .map_err(|e| OAuthError::TokenExchange {
                provider: provider.kind.to_string(),
                reason: e.to_string(),
            })?;

        let profile = self
            .fetch_profile(provider, token.access_token().secret())
            .await?;

        self.resolve_user(provider.kind, profile).await
    }

    async fn fetch_profile(
        &self,
        provider: &OAuthProvider,
        access_token: &str,
    ) -> Result<ProviderProfile, Error> {
        let user_info_error = |reason: String| OAuthError::UserInfo {
            provider: provider.kind.to_string(),
            reason,
        };

        let response = self
            .http_client
            .get(&provider.userinfo_url)
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, "rinkbook")
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(user_info_error(format!("status {}", response.status())).into());
        }

        let body = response.bytes().await?;
        let user_info: Value =
            serde_json::from_slice(&body).map_err(|e| user_info_error(e.to_string()))?;

        Ok(parse_profile(provider.kind, &user_info)?)
    }

    /// Finds the user linked to the provider account.
    ///
    /// Unlinked accounts are linked to the user with the same email, or to a new user.
    pub async fn resolve_user(
        &self,
        kind: ProviderKind,
        profile: ProviderProfile,
    ) -> Result<UserDto, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let now = self.clock.now().naive_utc();

        ctx.execute_with_retry(&format!("{} login for {}", kind, profile.email), |_| {
            let db = db.clone();
            let profile = profile.clone();

            Box::pin(async move {
                let txn = db.begin().await?;
                let oauth_repo = OAuthRepository::new(&txn);
                let user_repo = UserRepository::new(&txn);

                if let Some((_, Some(user))) = oauth_repo
                    .get_with_user(kind.as_str(), &profile.provider_user_id)
                    .await?
                {
                    txn.commit().await?;
                    tracing::info!(user_id = %user.id, "User signed in with {}", kind);

                    return Ok(UserDto::from(user));
                }

                let user = match user_repo.get_by_email(&profile.email).await? {
                    Some(user) => user,
                    None => {
                        let user = user_repo.create(&profile.email, false, false, now).await?;
                        tracing::info!(user_id = %user.id, "New user joined with {}", kind);

                        user
                    }
                };

                oauth_repo
                    .create(user.id, kind.as_str(), &profile.provider_user_id, now)
                    .await?;

                txn.commit().await?;
                tracing::info!(user_id = %user.id, "Linked {} account to user", kind);

                Ok(UserDto::from(user))
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    mod parse_profile {
        use serde_json::json;

        use crate::{
            model::auth::ProviderKind,
            server::{error::oauth::OAuthError, service::auth::callback::parse_profile},
        };

        /// Expect numeric GitHub IDs to be stringified and emails lowercased
        #[test]
        fn accepts_numeric_id() {
            let profile = parse_profile(
                ProviderKind::Github,
                &json!({"id": 4242, "email": "Skater@Example.com"}),
            )
            .unwrap();

            assert_eq!(profile.provider_user_id, "4242");
            assert_eq!(profile.email, "skater@example.com");
        }

        /// Expect MissingEmail when the provider withholds the email
        #[test]
        fn fails_without_email() {
            let result = parse_profile(ProviderKind::Github, &json!({"id": 4242, "email": null}));

            assert!(matches!(result, Err(OAuthError::MissingEmail(_))));
        }

        #[test]
        fn fails_without_id() {
            let result = parse_profile(ProviderKind::Google, &json!({"email": "a@example.com"}));

            assert!(matches!(result, Err(OAuthError::MissingProviderUserId(_))));
        }
    }

    mod resolve_user {
        use rinkbook_test_utils::prelude::*;
        use sea_orm::{EntityTrait, PaginatorTrait};

        use crate::{
            model::auth::ProviderKind,
            server::{
                service::auth::callback::{CallbackService, ProviderProfile},
                util::time::RinkClock,
            },
        };

        fn profile(id: &str, email: &str) -> ProviderProfile {
            ProviderProfile {
                provider_user_id: id.to_string(),
                email: email.to_string(),
            }
        }

        /// Expect an already linked account to sign in as its user
        #[tokio::test]
        async fn signs_in_linked_account() -> Result<(), TestError> {
            let mut test = test_setup_with_rink_tables!()?;
            let user = test.user().insert_user("skater@example.com").await?;
            test.user().insert_oauth_link(user.id, "google", "g-1").await?;
            let clock = RinkClock::fixed(test.timezone, test.now);
            let http_client = oauth2::reqwest::Client::new();

            let result = CallbackService::new(&test.db, &http_client, &clock)
                .resolve_user(ProviderKind::Google, profile("g-1", "changed@example.com"))
                .await
                .unwrap();

            assert_eq!(result.id, user.id);
            let links = entity::prelude::RinkbookOauth::find().count(&test.db).await?;
            assert_eq!(links, 1);

            Ok(())
        }

        /// Expect a new provider account to be linked to the user with the same email
        #[tokio::test]
        async fn links_account_by_email() -> Result<(), TestError> {
            let mut test = test_setup_with_rink_tables!()?;
            let user = test.user().insert_user("skater@example.com").await?;
            test.user().insert_oauth_link(user.id, "google", "g-1").await?;
            let clock = RinkClock::fixed(test.timezone, test.now);
            let http_client = oauth2::reqwest::Client::new();

            let result = CallbackService::new(&test.db, &http_client, &clock)
                .resolve_user(ProviderKind::Github, profile("4242", "skater@example.com"))
                .await
                .unwrap();

            assert_eq!(result.id, user.id);
            let links = entity::prelude::RinkbookOauth::find().count(&test.db).await?;
            assert_eq!(links, 2);

            Ok(())
        }

        /// Expect a user to be created for an unknown email
        #[tokio::test]
        async fn creates_new_user() -> Result<(), TestError> {
            let test = test_setup_with_rink_tables!()?;
            let clock = RinkClock::fixed(test.timezone, test.now);
            let http_client = oauth2::reqwest::Client::new();

            let result = CallbackService::new(&test.db, &http_client, &clock)
                .resolve_user(ProviderKind::Facebook, profile("fb-1", "new@example.com"))
                .await
                .unwrap();

            assert_eq!(result.email, "new@example.com");
            assert!(!result.is_administrator);
            let users = entity::prelude::RinkbookUser::find().count(&test.db).await?;
            assert_eq!(users, 1);

            Ok(())
        }
    }

    mod handle_callback {
        use rinkbook_test_utils::prelude::*;
        use serde_json::json;

        use crate::{
            model::auth::ProviderKind,
            server::{
                error::{oauth::OAuthError, Error},
                service::auth::callback::CallbackService,
                util::test::{test_http_client, test_provider},
                util::time::RinkClock,
            },
        };

        /// Expect the code exchange and user info fetch to log in the provider account
        #[tokio::test]
        async fn completes_login() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_rink_tables()
                .with_token_endpoint("github", "access_token", 1)
                .with_userinfo_endpoint(
                    "github",
                    json!({"id": 4242, "email": "skater@example.com"}),
                    1,
                )
                .build()
                .await?;
            let provider = test_provider(&test, ProviderKind::Github);
            let clock = RinkClock::fixed(test.timezone, test.now);
            let http_client = test_http_client();

            let user = CallbackService::new(&test.db, &http_client, &clock)
                .handle_callback(&provider, "code")
                .await
                .unwrap();

            assert_eq!(user.email, "skater@example.com");
            test.assert_mocks();

            Ok(())
        }

        /// Expect MissingEmail when the profile has no email
        #[tokio::test]
        async fn fails_without_email() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_rink_tables()
                .with_token_endpoint("github", "access_token", 1)
                .with_userinfo_endpoint("github", json!({"id": 4242, "email": null}), 1)
                .build()
                .await?;
            let provider = test_provider(&test, ProviderKind::Github);
            let clock = RinkClock::fixed(test.timezone, test.now);
            let http_client = test_http_client();

            let result = CallbackService::new(&test.db, &http_client, &clock)
                .handle_callback(&provider, "code")
                .await;

            assert!(matches!(
                result,
                Err(Error::OAuthError(OAuthError::MissingEmail(_)))
            ));
            test.assert_mocks();

            Ok(())
        }

        /// Expect UserInfo when the provider's user info endpoint fails
        #[tokio::test]
        async fn fails_for_user_info_error() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_rink_tables()
                .with_token_endpoint("google", "access_token", 1)
                .with_mock_endpoint(|server| {
                    server
                        .mock("GET", "/google/userinfo")
                        .match_query(mockito::Matcher::Any)
                        .with_status(503)
                        .create()
                })
                .build()
                .await?;
            let provider = test_provider(&test, ProviderKind::Google);
            let clock = RinkClock::fixed(test.timezone, test.now);
            let http_client = test_http_client();

            let result = CallbackService::new(&test.db, &http_client, &clock)
                .handle_callback(&provider, "code")
                .await;

            assert!(matches!(
                result,
                Err(Error::OAuthError(OAuthError::UserInfo { .. }))
            ));
            test.assert_mocks();

            Ok(())
        }

        /// Expect TokenExchange when the provider rejects the code
        #[tokio::test]
        async fn fails_for_rejected_code() -> Result<(), TestError> {
            let mut test = test_setup_with_rink_tables!()?;
            let mock = test.oauth().create_failing_token_endpoint("google");
            test.push_mock(mock);
            let provider = test_provider(&test, ProviderKind::Google);
            let clock = RinkClock::fixed(test.timezone, test.now);
            let http_client = test_http_client();

            let result = CallbackService::new(&test.db, &http_client, &clock)
                .handle_callback(&provider, "bad_code")
                .await;

            assert!(matches!(
                result,
                Err(Error::OAuthError(OAuthError::TokenExchange { .. }))
            ));
            test.assert_mocks();

            Ok(())
        }
    }
}
