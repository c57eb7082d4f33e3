//! Placeholder configuration values shared by tests.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Timezone rinks operate in during tests
pub const TEST_TIMEZONE: Tz = chrono_tz::America::New_York;

/// OAuth client ID configured for every mocked provider
pub static TEST_CLIENT_ID: &str = "rinkbook_client_id";

pub static TEST_CLIENT_SECRET: &str = "rinkbook_client_secret";

/// Base URL OAuth redirect URLs are built from
pub static TEST_APP_URL: &str = "http://localhost:8080";

pub const TEST_MAX_BOOKINGS_PER_DAY: u32 = 3;

/// Default pinned instant: 2025-01-15 10:00 in New York (15:00 UTC).
///
/// Local hour 12 on this day is 17:00 UTC.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 15, 0, 0)
        .single()
        .expect("valid test timestamp")
}
