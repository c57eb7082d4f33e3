use chrono::{Duration, NaiveDateTime};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::BookingModel, TestContext};

impl TestContext {
    pub fn booking<'a>(&'a mut self) -> BookingFixtures<'a> {
        BookingFixtures { test: self }
    }
}

pub struct BookingFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> BookingFixtures<'a> {
    /// Insert a one hour booking starting at the naive UTC `start_date`
    pub async fn insert_booking(
        &self,
        rink_id: i32,
        user_id: i32,
        start_date: NaiveDateTime,
    ) -> Result<BookingModel, TestError> {
        Ok(
            entity::prelude::RinkBooking::insert(entity::rink_booking::ActiveModel {
                rink_id: ActiveValue::Set(rink_id),
                user_id: ActiveValue::Set(user_id),
                start_date: ActiveValue::Set(start_date),
                end_date: ActiveValue::Set(start_date + Duration::hours(1)),
                group_size: ActiveValue::Set(1),
                created_at: ActiveValue::Set(self.test.now.naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Insert a booking at `hour:00` rink-local time today
    pub async fn insert_booking_at_hour(
        &self,
        rink_id: i32,
        user_id: i32,
        hour: u32,
    ) -> Result<BookingModel, TestError> {
        let start_date = self.test.local_hour_utc(hour);

        self.insert_booking(rink_id, user_id, start_date).await
    }
}
