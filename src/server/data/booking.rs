use chrono::{Duration, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct BookingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    /// Creates a new instance of [`BookingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a one hour booking starting at `start_date` (naive UTC)
    pub async fn create(
        &self,
        rink_id: i32,
        user_id: i32,
        start_date: NaiveDateTime,
        group_size: i32,
        created_at: NaiveDateTime,
    ) -> Result<entity::rink_booking::Model, DbErr> {
        let booking = entity::rink_booking::ActiveModel {
            rink_id: ActiveValue::Set(rink_id),
            user_id: ActiveValue::Set(user_id),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(start_date + Duration::hours(1)),
            group_size: ActiveValue::Set(group_size),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        };

        booking.insert(self.db).await
    }

    /// Bookings of a rink starting within `[from, to)`, ordered by start
    pub async fn get_for_rink_between(
        &self,
        rink_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<entity::rink_booking::Model>, DbErr> {
        entity::prelude::RinkBooking::find()
            .filter(entity::rink_booking::Column::RinkId.eq(rink_id))
            .filter(entity::rink_booking::Column::StartDate.gte(from))
            .filter(entity::rink_booking::Column::StartDate.lt(to))
            .order_by_asc(entity::rink_booking::Column::StartDate)
            .all(self.db)
            .await
    }

    /// Bookings of a user at any rink starting within `[from, to)`, ordered by start
    pub async fn get_for_user_between(
        &self,
        user_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<entity::rink_booking::Model>, DbErr> {
        entity::prelude::RinkBooking::find()
            .filter(entity::rink_booking::Column::UserId.eq(user_id))
            .filter(entity::rink_booking::Column::StartDate.gte(from))
            .filter(entity::rink_booking::Column::StartDate.lt(to))
            .order_by_asc(entity::rink_booking::Column::StartDate)
            .all(self.db)
            .await
    }

    /// Same as [`Self::get_for_user_between`] with each booking's rink
    pub async fn get_for_user_between_with_rink(
        &self,
        user_id: i32,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<(entity::rink_booking::Model, Option<entity::rink::Model>)>, DbErr> {
        entity::prelude::RinkBooking::find()
            .find_also_related(entity::rink::Entity)
            .filter(entity::rink_booking::Column::UserId.eq(user_id))
            .filter(entity::rink_booking::Column::StartDate.gte(from))
            .filter(entity::rink_booking::Column::StartDate.lt(to))
            .order_by_asc(entity::rink_booking::Column::StartDate)
            .all(self.db)
            .await
    }
}
