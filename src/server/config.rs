//! Environment-driven application configuration.

use chrono_tz::Tz;

use crate::{model::auth::ProviderKind, server::error::config::ConfigError};

pub const DEFAULT_APP_URL: &str = "http://localhost:8080";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;
pub const DEFAULT_MAX_BOOKINGS_PER_DAY: u32 = 3;

/// Client credentials for one OAuth provider
#[derive(Clone, Debug)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    /// Public base URL used to build OAuth redirect URLs
    pub app_url: String,
    pub bind_address: String,
    /// Timezone rink hours and "today" are expressed in
    pub timezone: Tz,
    pub max_bookings_per_day: u32,
    /// Enables the testing-only login route
    pub testing: bool,
    pub google: Option<ProviderCredentials>,
    pub github: Option<ProviderCredentials>,
    pub facebook: Option<ProviderCredentials>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            app_url: optional("APP_URL")
                .unwrap_or_else(|| DEFAULT_APP_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            timezone: match optional("TIMEZONE") {
                Some(value) => parse_timezone(&value)?,
                None => DEFAULT_TIMEZONE,
            },
            max_bookings_per_day: match optional("MAX_BOOKINGS") {
                Some(value) => parse_max_bookings(&value)?,
                None => DEFAULT_MAX_BOOKINGS_PER_DAY,
            },
            testing: match optional("TESTING") {
                Some(value) => parse_flag("TESTING", &value)?,
                None => false,
            },
            google: provider_credentials(ProviderKind::Google),
            github: provider_credentials(ProviderKind::Github),
            facebook: provider_credentials(ProviderKind::Facebook),
        })
    }

    /// Credentials of a provider, `None` when the provider is not enabled
    pub fn credentials(&self, kind: ProviderKind) -> Option<&ProviderCredentials> {
        match kind {
            ProviderKind::Google => self.google.as_ref(),
            ProviderKind::Github => self.github.as_ref(),
            ProviderKind::Facebook => self.facebook.as_ref(),
        }
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Reads a variable, treating empty values as unset
fn optional(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A provider is enabled when its client ID is set
fn provider_credentials(kind: ProviderKind) -> Option<ProviderCredentials> {
    let prefix = kind.as_str().to_ascii_uppercase();
    let client_id = optional(&format!("{}_OAUTH_CLIENT_ID", prefix))?;
    let client_secret = optional(&format!("{}_OAUTH_CLIENT_SECRET", prefix)).unwrap_or_default();

    Some(ProviderCredentials {
        client_id,
        client_secret,
    })
}

pub fn parse_timezone(value: &str) -> Result<Tz, ConfigError> {
    value.parse::<Tz>().map_err(|e| ConfigError::InvalidEnvValue {
        var: "TIMEZONE".to_string(),
        reason: e.to_string(),
    })
}

pub fn parse_max_bookings(value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(max) if max > 0 => Ok(max),
        Ok(_) => Err(ConfigError::InvalidEnvValue {
            var: "MAX_BOOKINGS".to_string(),
            reason: "must be at least 1".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidEnvValue {
            var: "MAX_BOOKINGS".to_string(),
            reason: e.to_string(),
        }),
    }
}

pub fn parse_flag(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("expected a boolean, got {:?}", value),
        }),
    }
}
