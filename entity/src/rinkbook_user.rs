use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rinkbook_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(nullable)]
    pub rink_id: Option<i32>,
    pub is_administrator: bool,
    pub is_coordinator: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rink::Entity",
        from = "Column::RinkId",
        to = "super::rink::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Rink,
    #[sea_orm(has_many = "super::rink_booking::Entity")]
    RinkBooking,
    #[sea_orm(has_many = "super::rinkbook_oauth::Entity")]
    RinkbookOauth,
}

impl Related<super::rink::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rink.def()
    }
}

impl Related<super::rink_booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkBooking.def()
    }
}

impl Related<super::rinkbook_oauth::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkbookOauth.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
