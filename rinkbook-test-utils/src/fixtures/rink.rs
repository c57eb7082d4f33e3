use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::RinkModel, TestContext};

impl TestContext {
    pub fn rink<'a>(&'a mut self) -> RinkFixtures<'a> {
        RinkFixtures { test: self }
    }
}

pub struct RinkFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> RinkFixtures<'a> {
    pub async fn insert_rink(
        &self,
        name: &str,
        capacity: i32,
        open_hour: i32,
        close_hour: i32,
    ) -> Result<RinkModel, TestError> {
        Ok(entity::prelude::Rink::insert(entity::rink::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            capacity: ActiveValue::Set(capacity),
            max_groups: ActiveValue::Set(capacity),
            open_hour: ActiveValue::Set(open_hour),
            close_hour: ActiveValue::Set(close_hour),
            map_link: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.test.now.naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}
