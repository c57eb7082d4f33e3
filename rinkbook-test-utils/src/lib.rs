//! Shared test setup for Rinkbook.
//!
//! Tests declare what they need with [`TestBuilder`] (tables, mock HTTP endpoints, the
//! pinned current instant) and receive a [`TestContext`] holding an in-memory SQLite
//! database, a memory-backed session and a mockito server standing in for OAuth providers.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{test_now, TEST_TIMEZONE},
        fixtures::factory,
        test_setup_with_rink_tables, test_setup_with_tables, TestBuilder, TestContext, TestError,
    };
}

/// Builds a [`TestContext`] with the provided entity tables created.
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestBuilder::new().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            $(.with_table($entity))+
            .build()
            .await
    }};
}

/// Builds a [`TestContext`] with every Rinkbook table created, plus any extra entities.
#[macro_export]
macro_rules! test_setup_with_rink_tables {
    () => {{
        $crate::TestBuilder::new().with_rink_tables().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            .with_rink_tables()
            $(.with_table($entity))+
            .build()
            .await
    }};
}
