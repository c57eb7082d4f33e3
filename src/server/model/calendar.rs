use chrono::DateTime;
use chrono_tz::Tz;

use crate::model::rink::TimeslotDto;

/// One bookable hour of a rink on a given day.
///
/// `end` is the last minute of the hour, so a timeslot starting at 12:00 ends at 12:59.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeslot {
    pub hour: u32,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub capacity: i32,
    pub occupied_count: i32,
    pub is_full: bool,
    /// Whether the requesting user holds one of the occupying bookings
    pub user_has_booked: bool,
}

impl From<Timeslot> for TimeslotDto {
    fn from(slot: Timeslot) -> Self {
        TimeslotDto {
            hour: slot.hour,
            start: slot.start.naive_local(),
            end: slot.end.naive_local(),
            capacity: slot.capacity,
            occupied_count: slot.occupied_count,
            is_full: slot.is_full,
            user_has_booked: slot.user_has_booked,
        }
    }
}
