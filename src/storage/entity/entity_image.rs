use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// Join table for the entity <-> image many-to-many.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entity_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub entity_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub image_id: i32,
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
    #[sea_orm(
        belongs_to = "super::image_with_caption::Entity",
        from = "Column::ImageId",
        to = "super::image_with_caption::Column::Id",
        on_delete = "Cascade"
    )]
    Image,
}

impl Related<super::myth_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MythEntity.def()
    }
}

impl Related<super::image_with_caption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
