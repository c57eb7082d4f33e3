use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rink")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub max_groups: i32,
    pub open_hour: i32,
    pub close_hour: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub map_link: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rink_booking::Entity")]
    RinkBooking,
    #[sea_orm(has_many = "super::rink_status::Entity")]
    RinkStatus,
    #[sea_orm(has_many = "super::rinkbook_user::Entity")]
    RinkbookUser,
}

impl Related<super::rink_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkBooking.def()
    }
}

impl Related<super::rink_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkStatus.def()
    }
}

impl Related<super::rinkbook_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkbookUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
