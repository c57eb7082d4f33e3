//! Mock OAuth provider endpoints.
//!
//! Each provider is served under `/{provider}/` on the mock server: `authorize`, `token`
//! and `userinfo`. Only token and user info are ever requested by the server.

use mockito::{Matcher, Mock};

use crate::TestContext;

impl TestContext {
    pub fn oauth<'a>(&'a mut self) -> OAuthFixtures<'a> {
        OAuthFixtures { test: self }
    }
}

pub struct OAuthFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> OAuthFixtures<'a> {
    /// Mock `POST /{provider}/token` returning a bearer token
    pub fn create_token_endpoint(
        &mut self,
        provider: &str,
        access_token: &str,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::json!({
            "access_token": access_token,
            "token_type": "bearer",
            "expires_in": 3600,
        });

        self.test
            .server
            .mock("POST", format!("/{}/token", provider).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Mock `GET /{provider}/userinfo` returning `body`
    pub fn create_userinfo_endpoint(
        &mut self,
        provider: &str,
        body: &serde_json::Value,
        expected_requests: usize,
    ) -> Mock {
        self.test
            .server
            .mock("GET", format!("/{}/userinfo", provider).as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Mock a token endpoint rejecting the authorization code
    pub fn create_failing_token_endpoint(&mut self, provider: &str) -> Mock {
        self.test
            .server
            .mock("POST", format!("/{}/token", provider).as_str())
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_grant"}"#)
            .create()
    }
}
