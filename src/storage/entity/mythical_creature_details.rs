use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mythical_creature_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub entity_id: i32,
    pub habitat: String,
    #[sea_orm(nullable)]
    pub diet: Option<String>,
    #[sea_orm(nullable)]
    pub size: Option<String>,
    #[sea_orm(nullable)]
    pub weaknesses: Option<String>,
    #[sea_orm(nullable)]
    pub strengths: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::myth_entity::Entity",
        from = "Column::EntityId",
        to = "super::myth_entity::Column::Id",
        on_delete = "Cascade"
    )]
    MythEntity,
}

impl Related<super::myth_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MythEntity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
