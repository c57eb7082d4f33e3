//! Rink-local time calculations.
//!
//! Timestamps are persisted as naive UTC. Rink operating hours and the notion of "today"
//! are expressed in the rink's configured timezone, so every conversion between the two
//! goes through [`RinkClock`]. The current instant comes from a [`Clock`] so tests can pin it.

use std::sync::Arc;

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
    Utc,
};
use chrono_tz::Tz;

use crate::server::error::{rink::RinkError, Error};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Timezone-aware clock used for every rink-local date and time calculation.
#[derive(Clone)]
pub struct RinkClock {
    tz: Tz,
    clock: Arc<dyn Clock>,
}

impl RinkClock {
    pub fn new(tz: Tz, clock: Arc<dyn Clock>) -> Self {
        Self { tz, clock }
    }

    /// Uses the system clock
    pub fn system(tz: Tz) -> Self {
        Self::new(tz, Arc::new(SystemClock))
    }

    /// Frozen at `now`
    pub fn fixed(tz: Tz, now: DateTime<Utc>) -> Self {
        Self::new(tz, Arc::new(FixedClock(now)))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.tz)
    }

    /// The current rink-local calendar date
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Attaches the rink timezone to a local wall-clock time.
    ///
    /// Ambiguous times (clocks falling back) resolve to the earliest instant. Times inside a
    /// spring-forward gap resolve to the first valid instant after the gap.
    pub fn localize(&self, local: NaiveDateTime) -> Result<DateTime<Tz>, Error> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => {
                let shifted = local + Duration::hours(1);
                let after_gap = self
                    .tz
                    .from_local_datetime(&shifted)
                    .earliest()
                    .ok_or_else(|| {
                        Error::ParseError(format!(
                            "Local time {} does not exist in timezone {}",
                            local, self.tz
                        ))
                    })?;

                // Drop back to the top of the hour the gap ends on
                Ok(after_gap - Duration::minutes(i64::from(shifted.minute())))
            }
        }
    }

    /// Local wall-clock instant `hour:minute` on `day`
    pub fn at(&self, day: NaiveDate, hour: u32, minute: u32) -> Result<DateTime<Tz>, Error> {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            RinkError::InvalidRequest(format!("Hour must be between 0 and 23, got {}", hour))
        })?;

        self.localize(day.and_time(time))
    }

    /// Whether `hour:00` on `day` exists on the local wall clock, false inside a
    /// spring-forward gap
    pub fn hour_exists(&self, day: NaiveDate, hour: u32) -> bool {
        NaiveTime::from_hms_opt(hour, 0, 0).is_some_and(|time| {
            !matches!(
                self.tz.from_local_datetime(&day.and_time(time)),
                LocalResult::None
            )
        })
    }

    /// Converts a stored naive UTC timestamp into rink-local time
    pub fn to_local(&self, utc: NaiveDateTime) -> DateTime<Tz> {
        Utc.from_utc_datetime(&utc).with_timezone(&self.tz)
    }

    /// UTC bounds `[start, end)` of a rink-local calendar day
    pub fn day_bounds_utc(&self, day: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
        let next = day.succ_opt().ok_or_else(|| {
            Error::ParseError(format!("Failed to calculate the day after {}", day))
        })?;

        let start = self.at(day, 0, 0)?.naive_utc();
        let end = self.at(next, 0, 0)?.naive_utc();

        Ok((start, end))
    }
}
