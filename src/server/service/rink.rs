//! Rinks, their status timeline and today's timeslots.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::rink::{CreateRinkDto, CreateStatusDto, RinkDetailDto, RinkDto, StatusDto},
    server::{
        data::{booking::BookingRepository, rink::RinkRepository, status::StatusRepository},
        error::{rink::RinkError, Error},
        model::db::{RinkModel, StatusModel},
        service::{calendar::SlotCalendar, retry::RetryContext},
        util::time::RinkClock,
    },
};

/// Converts a status with its dates localized to rink time
pub fn status_to_dto(status: StatusModel, clock: &RinkClock) -> StatusDto {
    StatusDto {
        id: status.id,
        is_open: status.is_open,
        state: status.state,
        description: status.description,
        start_date: clock.to_local(status.start_date).naive_local(),
        end_date: status
            .end_date
            .map(|end_date| clock.to_local(end_date).naive_local()),
    }
}

pub fn rink_to_dto(rink: RinkModel, status: Option<StatusModel>, clock: &RinkClock) -> RinkDto {
    RinkDto {
        id: rink.id,
        name: rink.name,
        capacity: rink.capacity,
        max_groups: rink.max_groups,
        open_hour: rink.open_hour,
        close_hour: rink.close_hour,
        map_link: rink.map_link,
        status: status.map(|status| status_to_dto(status, clock)),
    }
}

pub struct RinkService<'a> {
    db: &'a DatabaseConnection,
    clock: &'a RinkClock,
}

impl<'a> RinkService<'a> {
    /// Creates a new instance of [`RinkService`]
    pub fn new(db: &'a DatabaseConnection, clock: &'a RinkClock) -> Self {
        Self { db, clock }
    }

    /// All rinks ordered by name, each with its current status
    pub async fn list_rinks(&self) -> Result<Vec<RinkDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let clock = self.clock.clone();

        ctx.execute_with_retry("list rinks", |_| {
            let db = db.clone();
            let clock = clock.clone();

            Box::pin(async move {
                let rinks = RinkRepository::new(&db).get_all().await?;
                let rink_ids = rinks.iter().map(|r| r.id).collect();

                // Latest first, so the first status seen per rink wins
                let mut current: HashMap<i32, StatusModel> = HashMap::new();
                for status in StatusRepository::new(&db)
                    .get_current_for_rinks(rink_ids)
                    .await?
                {
                    current.entry(status.rink_id).or_insert(status);
                }

                Ok(rinks
                    .into_iter()
                    .map(|rink| {
                        let status = current.remove(&rink.id);
                        rink_to_dto(rink, status, &clock)
                    })
                    .collect())
            })
        })
        .await
    }

    /// A rink with its current status, `Ok(None)` if the rink does not exist
    pub async fn get_rink(&self, rink_id: i32) -> Result<Option<RinkDto>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let clock = self.clock.clone();

        ctx.execute_with_retry(&format!("get rink ID {}", rink_id), |_| {
            let db = db.clone();
            let clock = clock.clone();

            Box::pin(async move {
                let Some(rink) = RinkRepository::new(&db).get(rink_id).await? else {
                    return Ok(None);
                };
                let status = StatusRepository::new(&db).get_current(rink_id).await?;

                Ok(Some(rink_to_dto(rink, status, &clock)))
            })
        })
        .await
    }

    /// A rink with today's timeslots.
    ///
    /// When `user_id` is provided the slots the user holds a booking in are marked.
    pub async fn get_rink_detail(
        &self,
        rink_id: i32,
        user_id: Option<i32>,
    ) -> Result<RinkDetailDto, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let clock = self.clock.clone();

        ctx.execute_with_retry(&format!("get rink ID {} timeslots", rink_id), |_| {
            let db = db.clone();
            let clock = clock.clone();

            Box::pin(async move {
                let rink = RinkRepository::new(&db)
                    .get(rink_id)
                    .await?
                    .ok_or(RinkError::RinkNotFound(rink_id))?;
                let status = StatusRepository::new(&db).get_current(rink_id).await?;

                let day = clock.today();
                let (from, to) = clock.day_bounds_utc(day)?;
                let bookings = BookingRepository::new(&db)
                    .get_for_rink_between(rink_id, from, to)
                    .await?;

                let timeslots = SlotCalendar::new(&rink, &clock, day)
                    .timeslots(&bookings, user_id)?
                    .into_iter()
                    .map(Into::into)
                    .collect();

                Ok(RinkDetailDto {
                    rink: rink_to_dto(rink, status, &clock),
                    timeslots,
                })
            })
        })
        .await
    }

    /// Creates a rink after validating its hours and capacity
    pub async fn create_rink(&self, rink: CreateRinkDto) -> Result<RinkDto, Error> {
        validate_rink(&rink)?;

        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let clock = self.clock.clone();

        ctx.execute_with_retry(&format!("create rink {}", rink.name), |_| {
            let db = db.clone();
            let clock = clock.clone();
            let rink = rink.clone();

            Box::pin(async move {
                let rink = RinkRepository::new(&db)
                    .create(rink, clock.now().naive_utc())
                    .await?;

                tracing::info!(rink_id = %rink.id, "Created rink {}", rink.name);

                Ok(rink_to_dto(rink, None, &clock))
            })
        })
        .await
    }

    /// Replaces the rink's current status.
    ///
    /// The previous current status is closed at the same instant the new one starts, in one
    /// transaction, so a rink never has two open-ended statuses.
    pub async fn update_status(
        &self,
        rink_id: i32,
        status: CreateStatusDto,
    ) -> Result<StatusDto, Error> {
        if status.state.trim().is_empty() {
            return Err(RinkError::InvalidRequest("Status state must not be empty".to_string()).into());
        }

        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.db.clone();
        let clock = self.clock.clone();

        ctx.execute_with_retry(&format!("update rink ID {} status", rink_id), |_| {
            let db = db.clone();
            let clock = clock.clone();
            let status = status.clone();

            Box::pin(async move {
                let txn = db.begin().await?;

                RinkRepository::new(&txn)
                    .get(rink_id)
                    .await?
                    .ok_or(RinkError::RinkNotFound(rink_id))?;

                let now = clock.now().naive_utc();
                let status_repo = StatusRepository::new(&txn);
                status_repo.close_current(rink_id, now).await?;
                let created = status_repo
                    .create(
                        rink_id,
                        status.is_open,
                        status.state.trim().to_string(),
                        status.description,
                        now,
                    )
                    .await?;

                txn.commit().await?;

                tracing::info!(
                    rink_id = %rink_id,
                    "Rink status changed to {} (open: {})",
                    created.state,
                    created.is_open
                );

                Ok(status_to_dto(created, &clock))
            })
        })
        .await
    }
}

fn validate_rink(rink: &CreateRinkDto) -> Result<(), RinkError> {
    if rink.name.trim().is_empty() {
        return Err(RinkError::InvalidRequest("Rink name must not be empty".to_string()));
    }
    if rink.capacity < 1 || rink.max_groups < 1 {
        return Err(RinkError::InvalidRequest(
            "Capacity and max groups must be at least 1".to_string(),
        ));
    }
    if !(0..=23).contains(&rink.open_hour)
        || !(0..=23).contains(&rink.close_hour)
        || rink.open_hour > rink.close_hour
    {
        return Err(RinkError::InvalidRequest(format!(
            "Invalid operating hours {}-{}",
            rink.open_hour, rink.close_hour
        )));
    }

    Ok(())
}
