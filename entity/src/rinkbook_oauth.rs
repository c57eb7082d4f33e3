use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rinkbook_oauth")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub provider: String,
    pub provider_user_id: String,
    pub user_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rinkbook_user::Entity",
        from = "Column::UserId",
        to = "super::rinkbook_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RinkbookUser,
}

impl Related<super::rinkbook_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkbookUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
