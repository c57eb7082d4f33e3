//! Booking admission.
//!
//! A booking request is admitted only if, in order: the rink exists, the requested timeslot
//! today is not full, the user holds no booking overlapping that timeslot today (at any
//! rink), and the user is under the daily booking limit. The first failed check decides the
//! rejection. [`Admission::decide`] is the pure decision; [`BookingService::request_booking`]
//! runs it against a transactional snapshot and persists the booking.

use std::collections::HashMap;

use chrono::{NaiveDate, Timelike};
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction, DbErr,
    IsolationLevel, SqlErr, TransactionTrait,
};

use crate::{
    model::{booking::BookingDto, rink::RinkDto, user::UserDto},
    server::{
        data::{booking::BookingRepository, rink::RinkRepository, status::StatusRepository},
        error::{rink::RinkError, Error},
        model::{
            calendar::Timeslot,
            db::{BookingModel, RinkModel, StatusModel},
        },
        service::{
            calendar::{overlaps, SlotCalendar},
            retry::RetryContext,
        },
        util::time::RinkClock,
    },
};

/// Everything the admission decision looks at, fetched for one rink-local day
pub struct Admission<'a> {
    pub rink_id: i32,
    /// `None` when no rink has `rink_id`
    pub rink: Option<&'a RinkModel>,
    pub user_id: i32,
    pub hour: u32,
    /// The rink's bookings for the day
    pub rink_bookings: &'a [BookingModel],
    /// The user's bookings for the day at every rink
    pub user_bookings: &'a [BookingModel],
    pub max_bookings_per_day: u32,
}

impl<'a> Admission<'a> {
    /// Applies the admission checks in order, returning the rink and the requested timeslot
    /// when the booking may be made.
    pub fn decide(
        &self,
        clock: &RinkClock,
        day: NaiveDate,
    ) -> Result<(&'a RinkModel, Timeslot), Error> {
        let rink = self.rink.ok_or(RinkError::RinkNotFound(self.rink_id))?;

        let slot = SlotCalendar::new(rink, clock, day).timeslot(
            self.hour,
            self.rink_bookings,
            Some(self.user_id),
        )?;

        if slot.is_full {
            return Err(RinkError::SlotFull {
                rink_id: rink.id,
                hour: self.hour,
            }
            .into());
        }

        if self
            .user_bookings
            .iter()
            .any(|b| overlaps(b, clock, slot.start, Some(slot.end)))
        {
            return Err(RinkError::AlreadyBooked { hour: self.hour }.into());
        }

        if self.user_bookings.len() >= self.max_bookings_per_day as usize {
            return Err(RinkError::QuotaExceeded {
                limit: self.max_bookings_per_day,
            }
            .into());
        }

        Ok((rink, slot))
    }
}

/// Converts a booking with its dates localized to rink time
pub fn booking_to_dto(
    booking: BookingModel,
    rink: RinkDto,
    user: UserDto,
    clock: &RinkClock,
) -> BookingDto {
    let start = clock.to_local(booking.start_date);

    BookingDto {
        id: booking.id,
        rink,
        user,
        start_date: start.naive_local(),
        end_date: clock.to_local(booking.end_date).naive_local(),
        time: start.format("%H:%M").to_string(),
        hour: start.hour(),
        group_size: booking.group_size,
    }
}

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a RinkClock,
    max_bookings_per_day: u32,
}

impl<'a> BookingService<'a> {
    /// Creates a new instance of [`BookingService`]
    pub fn new(db: &'a DatabaseConnection, clock: &'a RinkClock, max_bookings_per_day: u32) -> Self {
        Self {
            db,
            clock,
            max_bookings_per_day,
        }
    }

    /// Books `hour` today at the rink for the user.
    ///
    /// The snapshot reads, the insert and a recount of the slot run in one transaction
    /// (SERIALIZABLE on Postgres). If concurrent requests pushed the slot over capacity the
    /// transaction is rolled back and [`RinkError::SlotFull`] returned. Exactly one booking
    /// row is written on success and none on failure.
    ///
    /// # Returns
    /// - `Ok((BookingModel, RinkModel, Option<StatusModel>))` - The new booking, its rink and
    ///   the rink's current status, all read in the booking transaction
    /// - `Err(Error::RinkError(_))` - Invalid request or rejected by an admission check
    /// - `Err(Error::DbErr(_))` - Database failure after retries
    pub async fn request_booking(
        &self,
        rink_id: i32,
        user_id: i32,
        hour: i32,
        group_size: i32,
    ) -> Result<(BookingModel, RinkModel, Option<StatusModel>), Error> {
        let hour = u32::try_from(hour)
            .ok()
            .filter(|hour| *hour <= 23)
            .ok_or_else(|| {
                RinkError::InvalidRequest(format!("Hour must be between 0 and 23, got {}", hour))
            })?;
        if group_size < 1 {
            return Err(
                RinkError::InvalidRequest("Group size must be at least 1".to_string()).into(),
            );
        }

        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let clock = self.clock.clone();
        let max_bookings_per_day = self.max_bookings_per_day;

        let result = ctx
            .execute_with_retry(
                &format!("booking of rink ID {} hour {} for user ID {}", rink_id, hour, user_id),
                |_| {
                    let db = db.clone();
                    let clock = clock.clone();

                    Box::pin(async move {
                        let txn = begin_booking_transaction(&db).await?;

                        let day = clock.today();
                        let (from, to) = clock.day_bounds_utc(day)?;

                        let rink = RinkRepository::new(&txn).get(rink_id).await?;
                        let booking_repo = BookingRepository::new(&txn);
                        let rink_bookings = match rink {
                            Some(_) => booking_repo.get_for_rink_between(rink_id, from, to).await?,
                            None => Vec::new(),
                        };
                        let user_bookings =
                            booking_repo.get_for_user_between(user_id, from, to).await?;

                        let admission = Admission {
                            rink_id,
                            rink: rink.as_ref(),
                            user_id,
                            hour,
                            rink_bookings: &rink_bookings,
                            user_bookings: &user_bookings,
                            max_bookings_per_day,
                        };
                        let (rink, slot) = admission.decide(&clock, day)?;

                        let booking = booking_repo
                            .create(
                                rink.id,
                                user_id,
                                slot.start.naive_utc(),
                                group_size,
                                clock.now().naive_utc(),
                            )
                            .await
                            .map_err(|err| duplicate_as_already_booked(err, hour))?;

                        let rink_bookings =
                            booking_repo.get_for_rink_between(rink.id, from, to).await?;
                        let recount =
                            SlotCalendar::new(rink, &clock, day).timeslot(hour, &rink_bookings, None)?;
                        if recount.occupied_count > rink.capacity {
                            // Dropping the transaction rolls back the insert
                            return Err(RinkError::SlotFull {
                                rink_id: rink.id,
                                hour,
                            }
                            .into());
                        }

                        let status = StatusRepository::new(&txn).get_current(rink.id).await?;

                        txn.commit().await?;

                        Ok((booking, rink.clone(), status))
                    })
                },
            )
            .await;

        match &result {
            Ok((booking, _, _)) => tracing::info!(
                booking_id = %booking.id,
                rink_id = %rink_id,
                user_id = %user_id,
                "Booked hour {}",
                hour
            ),
            Err(Error::RinkError(err)) => tracing::debug!(
                rink_id = %rink_id,
                user_id = %user_id,
                "Rejected booking of hour {}: {}",
                hour,
                err
            ),
            Err(_) => (),
        }

        result
    }

    /// The user's bookings today at every rink, ordered by start, with their rinks and the
    /// current status of each booked rink
    pub async fn get_user_bookings_today(
        &self,
        user_id: i32,
    ) -> Result<Vec<(BookingModel, RinkModel, Option<StatusModel>)>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let clock = self.clock.clone();

        ctx.execute_with_retry(&format!("get bookings for user ID {}", user_id), |_| {
            let db = db.clone();
            let clock = clock.clone();

            Box::pin(async move {
                let (from, to) = clock.day_bounds_utc(clock.today())?;

                let bookings = BookingRepository::new(&db)
                    .get_for_user_between_with_rink(user_id, from, to)
                    .await?;

                let mut rink_ids: Vec<i32> = bookings.iter().map(|(b, _)| b.rink_id).collect();
                rink_ids.sort_unstable();
                rink_ids.dedup();

                // Latest first, so the first status seen per rink is its current one
                let mut statuses: HashMap<i32, StatusModel> = HashMap::new();
                if !rink_ids.is_empty() {
                    for status in StatusRepository::new(&db)
                        .get_current_for_rinks(rink_ids)
                        .await?
                    {
                        statuses.entry(status.rink_id).or_insert(status);
                    }
                }

                bookings
                    .into_iter()
                    .map(|(booking, rink)| {
                        let rink = rink.ok_or_else(|| {
                            Error::InternalError(format!(
                                "Failed to find rink ID {} for booking ID {}",
                                booking.rink_id, booking.id
                            ))
                        })?;
                        let status = statuses.get(&rink.id).cloned();

                        Ok((booking, rink, status))
                    })
                    .collect()
            })
        })
        .await
    }
}

async fn begin_booking_transaction(db: &DatabaseConnection) -> Result<DatabaseTransaction, DbErr> {
    match db.get_database_backend() {
        DatabaseBackend::Postgres => {
            db.begin_with_config(Some(IsolationLevel::Serializable), Some(AccessMode::ReadWrite))
                .await
        }
        _ => db.begin().await,
    }
}

/// A concurrent identical request trips the unique index on (rink, user, start)
fn duplicate_as_already_booked(err: DbErr, hour: u32) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RinkError::AlreadyBooked { hour }.into(),
        _ => err.into(),
    }
}
