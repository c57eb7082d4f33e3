//! Slot calendar.
//!
//! Computes the hourly timeslots of a rink for one rink-local day from the bookings of that
//! day. Everything here is pure: the caller fetches the bookings and supplies the clock.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::server::{
    error::{rink::RinkError, Error},
    model::{
        calendar::Timeslot,
        db::{BookingModel, RinkModel},
    },
    util::time::RinkClock,
};

/// Whether `booking` occupies any minute of `[start, end]`.
///
/// A booking occupies `[start_date, end_date - 1 minute]`, so a 12:00 booking spans
/// 12:00 to 12:59 and does not touch the 13:00 slot. Without `end` the query is the
/// single instant `start`.
pub fn overlaps(
    booking: &BookingModel,
    clock: &RinkClock,
    start: DateTime<Tz>,
    end: Option<DateTime<Tz>>,
) -> bool {
    let booking_start = clock.to_local(booking.start_date);
    let booking_last = clock.to_local(booking.end_date) - Duration::minutes(1);

    match end {
        Some(end) => booking_start <= end && booking_last >= start,
        None => booking_start <= start && start <= booking_last,
    }
}

pub struct SlotCalendar<'a> {
    rink: &'a RinkModel,
    clock: &'a RinkClock,
    day: NaiveDate,
}

impl<'a> SlotCalendar<'a> {
    pub fn new(rink: &'a RinkModel, clock: &'a RinkClock, day: NaiveDate) -> Self {
        Self { rink, clock, day }
    }

    /// Timeslots for every operating hour, `[open_hour, close_hour)`, ascending.
    ///
    /// Hours skipped by a spring-forward transition have no slot.
    ///
    /// `user_id` marks the slots the user already holds a booking in; anonymous callers
    /// pass `None`.
    pub fn timeslots(
        &self,
        bookings: &[BookingModel],
        user_id: Option<i32>,
    ) -> Result<Vec<Timeslot>, Error> {
        let open_hour = u32::try_from(self.rink.open_hour).unwrap_or(0);
        let close_hour = u32::try_from(self.rink.close_hour).unwrap_or(0).min(24);

        let slots = (open_hour..close_hour)
            .filter(|hour| self.clock.hour_exists(self.day, *hour))
            .map(|hour| self.timeslot(hour, bookings, user_id))
            .collect::<Result<Vec<_>, _>>()?;

        for booking in bookings {
            let local_start = self.clock.to_local(booking.start_date);
            let in_hours = slots
                .iter()
                .any(|slot| overlaps(booking, self.clock, slot.start, Some(slot.end)));

            if !in_hours && local_start.date_naive() == self.day {
                tracing::warn!(
                    rink_id = %self.rink.id,
                    booking_id = %booking.id,
                    "Booking at {} falls outside operating hours {}-{}",
                    local_start.format("%H:%M"),
                    self.rink.open_hour,
                    self.rink.close_hour
                );
            }
        }

        Ok(slots)
    }

    /// The timeslot starting at `hour:00`.
    ///
    /// The hour is not checked against operating hours, only against the clock: it must be
    /// 0-23 and exist on `day` (not skipped by a spring-forward transition).
    pub fn timeslot(
        &self,
        hour: u32,
        bookings: &[BookingModel],
        user_id: Option<i32>,
    ) -> Result<Timeslot, Error> {
        if hour <= 23 && !self.clock.hour_exists(self.day, hour) {
            return Err(RinkError::InvalidRequest(format!(
                "Hour {} does not exist on {} in {}",
                hour,
                self.day,
                self.clock.timezone()
            ))
            .into());
        }

        let start = self.clock.at(self.day, hour, 0)?;
        let end = start + Duration::minutes(59);

        let occupying: Vec<&BookingModel> = bookings
            .iter()
            .filter(|b| overlaps(b, self.clock, start, Some(end)))
            .collect();

        let occupied_count = i32::try_from(occupying.len()).unwrap_or(i32::MAX);
        let user_has_booked = user_id
            .map(|user_id| occupying.iter().any(|b| b.user_id == user_id))
            .unwrap_or(false);

        Ok(Timeslot {
            hour,
            start,
            end,
            capacity: self.rink.capacity,
            occupied_count,
            is_full: occupied_count >= self.rink.capacity,
            user_has_booked,
        })
    }
}
