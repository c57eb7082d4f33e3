use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder};

use crate::model::rink::CreateRinkDto;

pub struct RinkRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RinkRepository<'a, C> {
    /// Creates a new instance of [`RinkRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        rink: CreateRinkDto,
        created_at: NaiveDateTime,
    ) -> Result<entity::rink::Model, DbErr> {
        let rink = entity::rink::ActiveModel {
            name: ActiveValue::Set(rink.name),
            capacity: ActiveValue::Set(rink.capacity),
            max_groups: ActiveValue::Set(rink.max_groups),
            open_hour: ActiveValue::Set(rink.open_hour),
            close_hour: ActiveValue::Set(rink.close_hour),
            map_link: ActiveValue::Set(rink.map_link),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        };

        rink.insert(self.db).await
    }

    pub async fn get(&self, rink_id: i32) -> Result<Option<entity::rink::Model>, DbErr> {
        entity::prelude::Rink::find_by_id(rink_id).one(self.db).await
    }

    /// All rinks ordered by name
    pub async fn get_all(&self) -> Result<Vec<entity::rink::Model>, DbErr> {
        entity::prelude::Rink::find()
            .order_by_asc(entity::rink::Column::Name)
            .order_by_asc(entity::rink::Column::Id)
            .all(self.db)
            .await
    }
}
