use crate::catalog::{EntityType, Gender};
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub entity_type: EntityType,
    #[sea_orm(nullable)]
    pub created_by: Option<i32>,
    #[sea_orm(nullable)]
    pub country_of_origin: Option<String>,
    #[sea_orm(nullable)]
    pub ethnicity: Option<String>,
    #[sea_orm(nullable)]
    pub gender: Option<Gender>,
    pub parents: String,     // JSON array
    pub descendants: String, // JSON array
    #[sea_orm(nullable)]
    pub appearance: Option<String>,
    #[sea_orm(nullable)]
    pub story: Option<String>,
    #[sea_orm(nullable)]
    pub powers: Option<String>,
    pub date_created: i64,
    pub date_modified: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    CreatedBy,
    #[sea_orm(has_one = "super::divinity_details::Entity")]
    DivinityDetails,
    #[sea_orm(has_one = "super::hero_details::Entity")]
    HeroDetails,
    #[sea_orm(has_one = "super::mythical_creature_details::Entity")]
    MythicalCreatureDetails,
    #[sea_orm(has_many = "super::entity_image::Entity")]
    EntityImage,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl Related<super::divinity_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DivinityDetails.def()
    }
}

impl Related<super::hero_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HeroDetails.def()
    }
}

impl Related<super::mythical_creature_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MythicalCreatureDetails.def()
    }
}

impl Related<super::image_with_caption::Entity> for Entity {
    fn to() -> RelationDef {
        super::entity_image::Relation::Image.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::entity_image::Relation::MythEntity.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now().timestamp();
        if insert {
            self.date_created = Set(now);
        }
        self.date_modified = Set(now);
        Ok(self)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.entity_type.as_str())
    }
}
