use oauth2::{CsrfToken, Scope};

use crate::server::model::auth::OAuthProvider;

/// Authorization URL to redirect the user to and the CSRF state to store in session
pub struct AuthLogin {
    pub login_url: String,
    pub state: String,
}

pub fn login_service(provider: &OAuthProvider) -> AuthLogin {
    let (url, csrf_token) = provider
        .client
        .authorize_url(CsrfToken::new_random)
        .add_scopes(provider.scopes.iter().cloned().map(Scope::new))
        .url();

    AuthLogin {
        login_url: url.to_string(),
        state: csrf_token.secret().to_string(),
    }
}
