//! In-memory models for tests which don't need the database.

use chrono::{Duration, NaiveDateTime};

use crate::{
    constant::test_now,
    model::{BookingModel, RinkModel},
};

pub fn rink(id: i32, capacity: i32, open_hour: i32, close_hour: i32) -> RinkModel {
    RinkModel {
        id,
        name: format!("Rink {}", id),
        capacity,
        max_groups: capacity,
        open_hour,
        close_hour,
        map_link: None,
        created_at: test_now().naive_utc(),
    }
}

/// One hour booking starting at the naive UTC `start_date`
pub fn booking(id: i32, rink_id: i32, user_id: i32, start_date: NaiveDateTime) -> BookingModel {
    BookingModel {
        id,
        rink_id,
        user_id,
        start_date,
        end_date: start_date + Duration::hours(1),
        group_size: 1,
        created_at: test_now().naive_utc(),
    }
}
