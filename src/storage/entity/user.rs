use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(nullable)]
    pub email: Option<String>,
    pub is_active: bool,
    #[sea_orm(nullable)]
    pub last_login: Option<i64>,
    pub date_joined: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::myth_entity::Entity")]
    MythEntity,
}

impl Related<super::myth_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MythEntity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
