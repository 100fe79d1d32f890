use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "divinity_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub entity_id: i32,
    pub cultural_role: String,
    #[sea_orm(nullable)]
    pub pantheon: Option<String>,
    #[sea_orm(nullable)]
    pub alignment: Option<String>,
    // JSON arrays
    pub domains: String,
    pub main_symbols: String,
    pub characteristics: String,
    #[sea_orm(nullable)]
    pub manifestations: Option<String>,
    pub symbolic_animals: String,
    pub power_objects: String,
    pub consorts: String,
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
