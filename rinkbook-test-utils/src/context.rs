//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test environment with an in-memory database, session and mock OAuth provider server.
///
/// ```ignore
/// let mut test = test_setup_with_rink_tables!()?;
///
/// let rink = test.rink().insert_rink("Dufferin Grove", 25, 8, 22).await?;
/// let user = test.user().insert_user("skater@example.com").await?;
/// test.booking().insert_booking_at_hour(rink.id, user.id, 12).await?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by a memory store
    pub session: Session,
    /// Instant the server clock is pinned to
    pub now: DateTime<Utc>,
    /// Timezone rink-local times are expressed in
    pub timezone: Tz,

    /// Mock HTTP server standing in for OAuth providers
    pub(crate) server: ServerGuard,
    /// Mock endpoints registered through the builder
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new(now: DateTime<Utc>, timezone: Tz) -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(Self {
            db,
            session,
            now,
            timezone,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock provider server
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// URL of a mocked provider endpoint, e.g. `provider_url("google", "token")`
    pub fn provider_url(&self, provider: &str, endpoint: &str) -> String {
        format!("{}/{}/{}", self.server.url(), provider, endpoint)
    }

    /// Rink-local date of the pinned instant
    pub fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.timezone).date_naive()
    }

    /// Naive UTC timestamp of `hour:00` rink-local time today
    pub fn local_hour_utc(&self, hour: u32) -> NaiveDateTime {
        self.local_time_utc(self.today(), hour, 0)
    }

    /// Naive UTC timestamp of `hour:minute` rink-local time on `day`
    pub fn local_time_utc(&self, day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        let local = day
            .and_hms_opt(hour, minute, 0)
            .expect("valid local time");

        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .expect("local time exists in test timezone")
            .naive_utc()
    }

    /// Register a mock created after build so it is checked by [`Self::assert_mocks`]
    pub fn push_mock(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Assert every registered mock endpoint was called the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called as expected
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
