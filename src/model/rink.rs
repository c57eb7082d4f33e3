use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A rink with its current status
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RinkDto {
    pub id: i32,
    pub name: String,
    /// Maximum number of bookings per hour
    pub capacity: i32,
    pub max_groups: i32,
    /// First bookable hour (24 hour time, rink-local)
    pub open_hour: i32,
    /// Hour the rink closes, never bookable itself
    pub close_hour: i32,
    pub map_link: Option<String>,
    /// Current status, `None` if no status has been posted yet
    pub status: Option<StatusDto>,
}

/// An entry in a rink's status timeline, dates are rink-local
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusDto {
    pub id: i32,
    pub is_open: bool,
    pub state: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
}

/// One bookable hour at a rink with its occupancy, times are rink-local
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TimeslotDto {
    pub hour: u32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub capacity: i32,
    pub occupied_count: i32,
    pub is_full: bool,
    /// Whether the requesting user holds a booking in this slot
    pub user_has_booked: bool,
}

/// A rink along with today's timeslots
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RinkDetailDto {
    pub rink: RinkDto,
    pub timeslots: Vec<TimeslotDto>,
}

/// Body for creating a rink
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateRinkDto {
    pub name: String,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default = "default_capacity")]
    pub max_groups: i32,
    #[serde(default = "default_open_hour")]
    pub open_hour: i32,
    #[serde(default = "default_close_hour")]
    pub close_hour: i32,
    #[serde(default)]
    pub map_link: Option<String>,
}

/// Body for posting a new current status for a rink
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateStatusDto {
    pub is_open: bool,
    pub state: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_capacity() -> i32 {
    25
}

fn default_open_hour() -> i32 {
    8
}

fn default_close_hour() -> i32 {
    22
}
