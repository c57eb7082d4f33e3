//! OAuth provider clients configured at startup.

use std::{collections::HashMap, sync::Arc};

use oauth2::{
    basic::BasicClient, AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
    RedirectUrl, TokenUrl,
};

use crate::{
    model::auth::ProviderKind,
    server::{
        config::{Config, ProviderCredentials},
        error::Error,
    },
};

/// OAuth2 client with the authorization and token endpoints set
pub type ProviderClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Endpoints a provider's login flow talks to
#[derive(Clone, Debug)]
pub struct ProviderEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl ProviderEndpoints {
    /// Public endpoints of each supported provider
    pub fn for_kind(kind: ProviderKind) -> Self {
        let (auth_url, token_url, userinfo_url) = match kind {
            ProviderKind::Google => (
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://oauth2.googleapis.com/token",
                "https://www.googleapis.com/oauth2/v1/userinfo",
            ),
            ProviderKind::Github => (
                "https://github.com/login/oauth/authorize",
                "https://github.com/login/oauth/access_token",
                "https://api.github.com/user",
            ),
            ProviderKind::Facebook => (
                "https://www.facebook.com/v19.0/dialog/oauth",
                "https://graph.facebook.com/v19.0/oauth/access_token",
                "https://graph.facebook.com/me?fields=id,email",
            ),
        };

        Self {
            auth_url: auth_url.to_string(),
            token_url: token_url.to_string(),
            userinfo_url: userinfo_url.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OAuthProvider {
    pub kind: ProviderKind,
    pub client: ProviderClient,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
}

impl OAuthProvider {
    pub fn new(
        kind: ProviderKind,
        credentials: &ProviderCredentials,
        endpoints: ProviderEndpoints,
        app_url: &str,
    ) -> Result<Self, Error> {
        let redirect_url = format!(
            "{}/login/{}/authorized",
            app_url.trim_end_matches('/'),
            kind
        );

        let client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
            .set_client_secret(ClientSecret::new(credentials.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(endpoints.auth_url)?)
            .set_token_uri(TokenUrl::new(endpoints.token_url)?)
            .set_redirect_uri(RedirectUrl::new(redirect_url)?);

        let scopes = match kind {
            ProviderKind::Google => vec!["profile", "email"],
            ProviderKind::Github => vec!["user:email"],
            ProviderKind::Facebook => vec!["email"],
        };

        Ok(Self {
            kind,
            client,
            userinfo_url: endpoints.userinfo_url,
            scopes: scopes.into_iter().map(String::from).collect(),
        })
    }
}

/// Enabled OAuth providers keyed by kind
#[derive(Clone, Debug, Default)]
pub struct OAuthProviders(Arc<HashMap<ProviderKind, OAuthProvider>>);

impl OAuthProviders {
    pub fn new(providers: Vec<OAuthProvider>) -> Self {
        Self(Arc::new(
            providers.into_iter().map(|p| (p.kind, p)).collect(),
        ))
    }

    /// Builds a client for every provider with credentials configured
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut providers = Vec::new();

        for kind in [ProviderKind::Google, ProviderKind::Github, ProviderKind::Facebook] {
            if let Some(credentials) = config.credentials(kind) {
                providers.push(OAuthProvider::new(
                    kind,
                    credentials,
                    ProviderEndpoints::for_kind(kind),
                    &config.app_url,
                )?);
            }
        }

        Ok(Self::new(providers))
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&OAuthProvider> {
        self.0.get(&kind)
    }

    /// Kinds of the enabled providers in a stable order
    pub fn enabled(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = self.0.keys().copied().collect();
        kinds.sort();

        kinds
    }
}
