use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rink_booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rink_id: i32,
    pub user_id: i32,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub group_size: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rink::Entity",
        from = "Column::RinkId",
        to = "super::rink::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Rink,
    #[sea_orm(
        belongs_to = "super::rinkbook_user::Entity",
        from = "Column::UserId",
        to = "super::rinkbook_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RinkbookUser,
}

impl Related<super::rink::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rink.def()
    }
}

impl Related<super::rinkbook_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkbookUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
