use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::StatusModel, TestContext};

impl TestContext {
    pub fn status<'a>(&'a mut self) -> StatusFixtures<'a> {
        StatusFixtures { test: self }
    }
}

pub struct StatusFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> StatusFixtures<'a> {
    /// Insert a status for the rink, current when `end_date` is `None`
    pub async fn insert_status(
        &self,
        rink_id: i32,
        is_open: bool,
        state: &str,
        start_date: NaiveDateTime,
        end_date: Option<NaiveDateTime>,
    ) -> Result<StatusModel, TestError> {
        Ok(
            entity::prelude::RinkStatus::insert(entity::rink_status::ActiveModel {
                rink_id: ActiveValue::Set(rink_id),
                is_open: ActiveValue::Set(is_open),
                state: ActiveValue::Set(state.to_string()),
                description: ActiveValue::Set(None),
                start_date: ActiveValue::Set(start_date),
                end_date: ActiveValue::Set(end_date),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
