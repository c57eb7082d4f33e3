//! Declarative test builder.
//!
//! Configuration methods queue work which is executed by `build()`: tables are created,
//! then mock endpoints are registered on the mock provider server.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use mockito::{Mock, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{
    constant::{test_now, TEST_TIMEZONE},
    error::TestError,
    TestContext,
};

type MockBuilder = Box<dyn FnOnce(&mut ServerGuard) -> Mock>;

pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_rink_tables: bool,
    now: DateTime<Utc>,
    timezone: Tz,
    mock_builders: Vec<MockBuilder>,
    /// (provider, access token, expected requests)
    token_endpoints: Vec<(String, String, usize)>,
    /// (provider, user info body, expected requests)
    userinfo_endpoints: Vec<(String, serde_json::Value, usize)>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_rink_tables: false,
            now: test_now(),
            timezone: TEST_TIMEZONE,
            mock_builders: Vec::new(),
            token_endpoints: Vec::new(),
            userinfo_endpoints: Vec::new(),
        }
    }

    /// Create every Rinkbook table, in foreign key order
    pub fn with_rink_tables(mut self) -> Self {
        self.include_rink_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// ```no_run
    /// use rinkbook_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), rinkbook_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Rink)
    ///     .with_table(RinkStatus)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Pin the current instant seen by the server clock
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Register an arbitrary mock endpoint on the provider server
    pub fn with_mock_endpoint<F>(mut self, builder: F) -> Self
    where
        F: FnOnce(&mut ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(builder));
        self
    }

    /// Mock a provider's token endpoint returning `access_token`
    pub fn with_token_endpoint(
        mut self,
        provider: &str,
        access_token: &str,
        expected_requests: usize,
    ) -> Self {
        self.token_endpoints.push((
            provider.to_string(),
            access_token.to_string(),
            expected_requests,
        ));
        self
    }

    /// Mock a provider's user info endpoint returning `body`
    pub fn with_userinfo_endpoint(
        mut self,
        provider: &str,
        body: serde_json::Value,
        expected_requests: usize,
    ) -> Self {
        self.userinfo_endpoints
            .push((provider.to_string(), body, expected_requests));
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut test = TestContext::new(self.now, self.timezone).await?;

        let mut tables = Vec::new();
        if self.include_rink_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            tables.push(schema.create_table_from_entity(entity::prelude::Rink));
            tables.push(schema.create_table_from_entity(entity::prelude::RinkbookUser));
            tables.push(schema.create_table_from_entity(entity::prelude::RinkbookOauth));
            tables.push(schema.create_table_from_entity(entity::prelude::RinkStatus));
            tables.push(schema.create_table_from_entity(entity::prelude::RinkBooking));
        }
        tables.extend(self.tables);
        test.with_tables(tables).await?;

        for (provider, access_token, expected) in self.token_endpoints {
            let mock = test
                .oauth()
                .create_token_endpoint(&provider, &access_token, expected);
            test.mocks.push(mock);
        }

        for (provider, body, expected) in self.userinfo_endpoints {
            let mock = test
                .oauth()
                .create_userinfo_endpoint(&provider, &body, expected);
            test.mocks.push(mock);
        }

        for builder in self.mock_builders {
            let mock = builder(&mut test.server);
            test.mocks.push(mock);
        }

        Ok(test)
    }
}
