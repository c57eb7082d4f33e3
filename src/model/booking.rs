use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{rink::RinkDto, user::UserDto};

/// Body of a booking request
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookingRequestDto {
    pub rink_id: i32,
    /// Hour of today to book (0-23, rink-local)
    pub hour: i32,
    #[serde(default = "default_group_size")]
    pub group_size: i32,
}

/// A booked timeslot, dates are rink-local
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub rink: RinkDto,
    pub user: UserDto,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    /// Wall-clock start formatted as `HH:MM`
    pub time: String,
    pub hour: u32,
    pub group_size: i32,
}

fn default_group_size() -> i32 {
    1
}
