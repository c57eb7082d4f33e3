use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rink_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rink_id: i32,
    pub is_open: bool,
    pub state: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    pub start_date: DateTime,
    #[sea_orm(nullable)]
    pub end_date: Option<DateTime>,
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
}

impl Related<super::rink::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
