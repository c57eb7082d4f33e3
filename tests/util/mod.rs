//! Test utilities for calling handlers with an [`AppState`] built from a [`TestContext`]

use std::sync::Arc;

use axum::response::Response;
use http_body_util::BodyExt;
use rinkbook::{
    model::auth::ProviderKind,
    server::{
        config::ProviderCredentials,
        model::{
            app::AppState,
            auth::{OAuthProvider, OAuthProviders, ProviderEndpoints},
            session::user::SessionUserId,
        },
        startup::build_http_client,
        util::time::RinkClock,
    },
};
use rinkbook_test_utils::{
    constant::{TEST_APP_URL, TEST_CLIENT_ID, TEST_CLIENT_SECRET, TEST_MAX_BOOKINGS_PER_DAY},
    TestContext,
};
use serde::de::DeserializeOwned;
use tower_sessions::{MemoryStore, Session};

/// Extension trait for TestContext to create AppState pointed at the mock provider server
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;

    fn into_app_state_with_testing(&self, testing: bool) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.into_app_state_with_testing(true)
    }

    fn into_app_state_with_testing(&self, testing: bool) -> AppState {
        let credentials = ProviderCredentials {
            client_id: TEST_CLIENT_ID.to_string(),
            client_secret: TEST_CLIENT_SECRET.to_string(),
        };

        let providers = [ProviderKind::Google, ProviderKind::Github, ProviderKind::Facebook]
            .into_iter()
            .map(|kind| {
                let endpoints = ProviderEndpoints {
                    auth_url: self.provider_url(kind.as_str(), "authorize"),
                    token_url: self.provider_url(kind.as_str(), "token"),
                    userinfo_url: self.provider_url(kind.as_str(), "userinfo"),
                };

                OAuthProvider::new(kind, &credentials, endpoints, TEST_APP_URL)
                    .expect("Failed to build test OAuth provider")
            })
            .collect();

        AppState::new(
            self.db.clone(),
            build_http_client().expect("Failed to build HTTP client"),
            OAuthProviders::new(providers),
            RinkClock::fixed(self.timezone, self.now),
            TEST_MAX_BOOKINGS_PER_DAY,
            testing,
        )
    }
}

/// A fresh session with `user_id` logged in
pub async fn session_for(user_id: i32) -> Session {
    let session = Session::new(None, Arc::new(MemoryStore::default()), None);
    SessionUserId::insert(&session, user_id)
        .await
        .expect("Failed to insert user ID into session");

    session
}

/// A fresh session with nobody logged in
pub fn anonymous_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

pub async fn body_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to deserialize response body")
}
