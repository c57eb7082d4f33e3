use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, UpdateResult,
};

pub struct StatusRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatusRepository<'a, C> {
    /// Creates a new instance of [`StatusRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends an open-ended status to the rink's timeline.
    ///
    /// Does not close the previous current status, see [`Self::close_current`].
    pub async fn create(
        &self,
        rink_id: i32,
        is_open: bool,
        state: String,
        description: Option<String>,
        start_date: NaiveDateTime,
    ) -> Result<entity::rink_status::Model, DbErr> {
        let status = entity::rink_status::ActiveModel {
            rink_id: ActiveValue::Set(rink_id),
            is_open: ActiveValue::Set(is_open),
            state: ActiveValue::Set(state),
            description: ActiveValue::Set(description),
            start_date: ActiveValue::Set(start_date),
            end_date: ActiveValue::Set(None),
            ..Default::default()
        };

        status.insert(self.db).await
    }

    /// Sets `end_date` on every open-ended status of the rink
    pub async fn close_current(
        &self,
        rink_id: i32,
        end_date: NaiveDateTime,
    ) -> Result<UpdateResult, DbErr> {
        entity::prelude::RinkStatus::update_many()
            .col_expr(entity::rink_status::Column::EndDate, Expr::value(end_date))
            .filter(entity::rink_status::Column::RinkId.eq(rink_id))
            .filter(entity::rink_status::Column::EndDate.is_null())
            .exec(self.db)
            .await
    }

    /// The latest status without an end date
    pub async fn get_current(
        &self,
        rink_id: i32,
    ) -> Result<Option<entity::rink_status::Model>, DbErr> {
        entity::prelude::RinkStatus::find()
            .filter(entity::rink_status::Column::RinkId.eq(rink_id))
            .filter(entity::rink_status::Column::EndDate.is_null())
            .order_by_desc(entity::rink_status::Column::StartDate)
            .order_by_desc(entity::rink_status::Column::Id)
            .one(self.db)
            .await
    }

    /// Open-ended statuses of the given rinks, latest first
    pub async fn get_current_for_rinks(
        &self,
        rink_ids: Vec<i32>,
    ) -> Result<Vec<entity::rink_status::Model>, DbErr> {
        entity::prelude::RinkStatus::find()
            .filter(entity::rink_status::Column::RinkId.is_in(rink_ids))
            .filter(entity::rink_status::Column::EndDate.is_null())
            .order_by_desc(entity::rink_status::Column::StartDate)
            .order_by_desc(entity::rink_status::Column::Id)
            .all(self.db)
            .await
    }
}
