use oauth2::reqwest;
use sea_orm::DatabaseConnection;

use crate::server::{model::auth::OAuthProviders, util::time::RinkClock};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Client used for OAuth token exchange and user info requests
    pub http_client: reqwest::Client,
    pub providers: OAuthProviders,
    pub clock: RinkClock,
    pub max_bookings_per_day: u32,
    pub testing: bool,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        providers: OAuthProviders,
        clock: RinkClock,
        max_bookings_per_day: u32,
        testing: bool,
    ) -> Self {
        Self {
            db,
            http_client,
            providers,
            clock,
            max_bookings_per_day,
            testing,
        }
    }
}
