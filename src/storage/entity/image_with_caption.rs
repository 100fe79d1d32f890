use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "images_with_caption")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(nullable)]
    pub image: Option<String>, // path relative to the media root
    #[sea_orm(nullable)]
    pub caption: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entity_image::Entity")]
    EntityImage,
}

impl Related<super::myth_entity::Entity> for Entity {
    fn to() -> RelationDef {
        super::entity_image::Relation::MythEntity.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::entity_image::Relation::Image.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption.as_deref().unwrap_or("No caption"))
    }
}
