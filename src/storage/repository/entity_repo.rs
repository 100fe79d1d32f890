use crate::catalog::{
    DivinityDetails, EntityDetails, EntityPatch, EntityType, HeroDetails,
    MythicalCreatureDetails, NewEntity,
};
use crate::storage::entity::myth_entity::{
    self, ActiveModel as MythEntityActiveModel, Entity as MythEntity,
};
use crate::storage::entity::{divinity_details, hero_details, mythical_creature_details};
use crate::storage::error::{duplicate_or_db, StoreError};
use chrono::Utc;
use log::warn;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// An entity row together with its type-specific details.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub entity: myth_entity::Model,
    pub details: Option<EntityDetails>,
}

impl EntityRecord {
    pub fn parents(&self) -> Vec<String> {
        from_json_list(&self.entity.parents)
    }

    pub fn descendants(&self) -> Vec<String> {
        from_json_list(&self.entity.descendants)
    }
}

pub struct EntityRepository;

impl EntityRepository {
    /// Inserts the entity and its detail row in one transaction; either both
    /// exist afterwards or neither does.
    pub async fn create_with_details(
        db: &DatabaseConnection,
        new: NewEntity,
        created_by: Option<i32>,
    ) -> Result<myth_entity::Model, StoreError> {
        let entity_type = new.entity_type();
        let active_model = MythEntityActiveModel {
            name: Set(new.name.clone()),
            entity_type: Set(entity_type),
            created_by: Set(created_by),
            country_of_origin: Set(new.country_of_origin),
            ethnicity: Set(new.ethnicity),
            gender: Set(new.gender),
            parents: Set(to_json_list(&new.parents)),
            descendants: Set(to_json_list(&new.descendants)),
            appearance: Set(new.appearance),
            story: Set(new.story),
            powers: Set(new.powers),
            ..Default::default()
        };

        let txn = db.begin().await?;
        let entity = active_model.insert(&txn).await.map_err(|e| {
            duplicate_or_db(e, || {
                format!("{} '{}'", entity_type.as_str(), new.name)
            })
        })?;
        insert_details(&txn, entity.id, &new.details).await?;
        txn.commit().await?;

        Ok(entity)
    }

    pub async fn find_with_details(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<EntityRecord>, DbErr> {
        let Some(entity) = MythEntity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let details = load_details(db, &entity).await?;
        Ok(Some(EntityRecord { entity, details }))
    }

    pub async fn find_by_name(
        db: &DatabaseConnection,
        name: &str,
        entity_type: EntityType,
    ) -> Result<Option<myth_entity::Model>, DbErr> {
        MythEntity::find()
            .filter(myth_entity::Column::Name.eq(name))
            .filter(myth_entity::Column::EntityType.eq(entity_type))
            .one(db)
            .await
    }

    pub async fn list(
        db: &DatabaseConnection,
        entity_type: Option<EntityType>,
    ) -> Result<Vec<myth_entity::Model>, DbErr> {
        let mut query = MythEntity::find();
        if let Some(t) = entity_type {
            query = query.filter(myth_entity::Column::EntityType.eq(t));
        }
        query
            .order_by_asc(myth_entity::Column::Name)
            .order_by_asc(myth_entity::Column::Id)
            .all(db)
            .await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        MythEntity::find().count(db).await
    }

    /// Applies `patch` to the entity columns; `date_modified` is refreshed
    /// even when nothing else changes.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        patch: EntityPatch,
    ) -> Result<myth_entity::Model, StoreError> {
        let model = MythEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("entity {}", id)))?;
        let entity_type = model.entity_type;
        let mut active_model: MythEntityActiveModel = model.into();

        if let Some(v) = patch.name.clone() {
            active_model.name = Set(v);
        }
        if let Some(v) = patch.country_of_origin {
            active_model.country_of_origin = Set(v);
        }
        if let Some(v) = patch.ethnicity {
            active_model.ethnicity = Set(v);
        }
        if let Some(v) = patch.gender {
            active_model.gender = Set(v);
        }
        if let Some(v) = patch.parents {
            active_model.parents = Set(to_json_list(&v));
        }
        if let Some(v) = patch.descendants {
            active_model.descendants = Set(to_json_list(&v));
        }
        if let Some(v) = patch.appearance {
            active_model.appearance = Set(v);
        }
        if let Some(v) = patch.story {
            active_model.story = Set(v);
        }
        if let Some(v) = patch.powers {
            active_model.powers = Set(v);
        }

        active_model.update(db).await.map_err(|e| {
            duplicate_or_db(e, || {
                format!(
                    "{} '{}'",
                    entity_type.as_str(),
                    patch.name.unwrap_or_default()
                )
            })
        })
    }

    /// Swaps the detail row of an entity. The variant must match the stored
    /// `entity_type`.
    pub async fn replace_details(
        db: &DatabaseConnection,
        id: i32,
        details: EntityDetails,
    ) -> Result<(), StoreError> {
        let txn = db.begin().await?;
        let entity = MythEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("entity {}", id)))?;

        if entity.entity_type != details.entity_type() {
            return Err(StoreError::DetailKindMismatch {
                id,
                expected: entity.entity_type,
                found: details.entity_type(),
            });
        }

        delete_details(&txn, &entity).await?;
        insert_details(&txn, id, &details).await?;
        // touch the parent so date_modified reflects the change
        let mut active_model: MythEntityActiveModel = entity.into();
        active_model.date_modified = Set(Utc::now().timestamp());
        active_model.update(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Removes the entity; the detail row and image links go with it.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
        let res = MythEntity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}

async fn insert_details<C>(conn: &C, entity_id: i32, details: &EntityDetails) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    match details {
        EntityDetails::Divinity(d) => {
            divinity_details::ActiveModel {
                entity_id: Set(entity_id),
                cultural_role: Set(d.cultural_role.clone()),
                pantheon: Set(d.pantheon.clone()),
                alignment: Set(d.alignment.clone()),
                domains: Set(to_json_list(&d.domains)),
                main_symbols: Set(to_json_list(&d.main_symbols)),
                characteristics: Set(to_json_list(&d.characteristics)),
                manifestations: Set(d.manifestations.clone()),
                symbolic_animals: Set(to_json_list(&d.symbolic_animals)),
                power_objects: Set(to_json_list(&d.power_objects)),
                consorts: Set(to_json_list(&d.consorts)),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
        EntityDetails::Hero(h) => {
            hero_details::ActiveModel {
                entity_id: Set(entity_id),
                titles: Set(h.titles.clone()),
                achievements: Set(h.achievements.clone()),
                enemies: Set(to_json_list(&h.enemies)),
                allies: Set(to_json_list(&h.allies)),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
        EntityDetails::MythicalCreature(c) => {
            mythical_creature_details::ActiveModel {
                entity_id: Set(entity_id),
                habitat: Set(c.habitat.clone()),
                diet: Set(c.diet.clone()),
                size: Set(c.size.clone()),
                weaknesses: Set(c.weaknesses.clone()),
                strengths: Set(c.strengths.clone()),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
    }
    Ok(())
}

async fn delete_details<C>(conn: &C, entity: &myth_entity::Model) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    match entity.entity_type {
        EntityType::Divinity => {
            divinity_details::Entity::delete_many()
                .filter(divinity_details::Column::EntityId.eq(entity.id))
                .exec(conn)
                .await?;
        }
        EntityType::Hero => {
            hero_details::Entity::delete_many()
                .filter(hero_details::Column::EntityId.eq(entity.id))
                .exec(conn)
                .await?;
        }
        EntityType::MythicalCreature => {
            mythical_creature_details::Entity::delete_many()
                .filter(mythical_creature_details::Column::EntityId.eq(entity.id))
                .exec(conn)
                .await?;
        }
    }
    Ok(())
}

async fn load_details(
    db: &DatabaseConnection,
    entity: &myth_entity::Model,
) -> Result<Option<EntityDetails>, DbErr> {
    let details = match entity.entity_type {
        EntityType::Divinity => entity
            .find_related(divinity_details::Entity)
            .one(db)
            .await?
            .map(|m| EntityDetails::Divinity(m.into())),
        EntityType::Hero => entity
            .find_related(hero_details::Entity)
            .one(db)
            .await?
            .map(|m| EntityDetails::Hero(m.into())),
        EntityType::MythicalCreature => entity
            .find_related(mythical_creature_details::Entity)
            .one(db)
            .await?
            .map(|m| EntityDetails::MythicalCreature(m.into())),
    };
    Ok(details)
}

impl From<divinity_details::Model> for DivinityDetails {
    fn from(model: divinity_details::Model) -> Self {
        Self {
            cultural_role: model.cultural_role,
            pantheon: model.pantheon,
            alignment: model.alignment,
            domains: from_json_list(&model.domains),
            main_symbols: from_json_list(&model.main_symbols),
            characteristics: from_json_list(&model.characteristics),
            manifestations: model.manifestations,
            symbolic_animals: from_json_list(&model.symbolic_animals),
            power_objects: from_json_list(&model.power_objects),
            consorts: from_json_list(&model.consorts),
        }
    }
}

impl From<hero_details::Model> for HeroDetails {
    fn from(model: hero_details::Model) -> Self {
        Self {
            titles: model.titles,
            achievements: model.achievements,
            enemies: from_json_list(&model.enemies),
            allies: from_json_list(&model.allies),
        }
    }
}

impl From<mythical_creature_details::Model> for MythicalCreatureDetails {
    fn from(model: mythical_creature_details::Model) -> Self {
        Self {
            habitat: model.habitat,
            diet: model.diet,
            size: model.size,
            weaknesses: model.weaknesses,
            strengths: model.strengths,
        }
    }
}

fn to_json_list(items: &[String]) -> String {
    serde_json::Value::from(items.to_vec()).to_string()
}

/// A column that does not hold a JSON list of strings reads as empty.
fn from_json_list(raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("ignoring malformed list column {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Gender;
    use crate::storage::connection::test_connection;
    use crate::storage::repository::UserRepository;

    fn zeus() -> NewEntity {
        let mut new = NewEntity::new(
            "Zeus",
            EntityDetails::Divinity(DivinityDetails {
                cultural_role: "King of the gods".to_string(),
                pantheon: Some("Olympian".to_string()),
                domains: vec!["sky".to_string(), "thunder".to_string()],
                ..Default::default()
            }),
        );
        new.gender = Some(Gender::Male);
        new.parents = vec!["Cronus".to_string(), "Rhea".to_string()];
        new
    }

    #[tokio::test]
    async fn creates_entity_with_matching_details() {
        let db = test_connection().await;
        let entity = EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap();
        assert_eq!(entity.entity_type, EntityType::Divinity);
        assert_eq!(entity.to_string(), "Zeus (Divinity)");
        assert_eq!(entity.date_created, entity.date_modified);

        let record = EntityRepository::find_with_details(&db, entity.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.parents(), vec!["Cronus", "Rhea"]);
        assert!(record.descendants().is_empty());
        match record.details {
            Some(EntityDetails::Divinity(d)) => {
                assert_eq!(d.cultural_role, "King of the gods");
                assert_eq!(d.domains, vec!["sky", "thunder"]);
                assert!(d.consorts.is_empty());
            }
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[tokio::test]
    async fn duplicate_name_and_type_is_rejected() {
        let db = test_connection().await;
        EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap();
        let err = EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)), "got {err:?}");
        assert_eq!(EntityRepository::count(&db).await.unwrap(), 1);

        // same name under another type is a different entity
        let hero = NewEntity::new("Zeus", EntityDetails::Hero(HeroDetails::default()));
        EntityRepository::create_with_details(&db, hero, None)
            .await
            .unwrap();
        assert_eq!(EntityRepository::count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn replace_details_rejects_kind_mismatch() {
        let db = test_connection().await;
        let entity = EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap();

        let err = EntityRepository::replace_details(
            &db,
            entity.id,
            EntityDetails::MythicalCreature(MythicalCreatureDetails {
                habitat: "Olympus".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            StoreError::DetailKindMismatch {
                expected: EntityType::Divinity,
                found: EntityType::MythicalCreature,
                ..
            }
        ));

        EntityRepository::replace_details(
            &db,
            entity.id,
            EntityDetails::Divinity(DivinityDetails {
                cultural_role: "Sky father".to_string(),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        let record = EntityRepository::find_with_details(&db, entity.id)
            .await
            .unwrap()
            .unwrap();
        match record.details {
            Some(EntityDetails::Divinity(d)) => assert_eq!(d.cultural_role, "Sky father"),
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_applies_patch() {
        let db = test_connection().await;
        let entity = EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap();

        let updated = EntityRepository::update(
            &db,
            entity.id,
            EntityPatch {
                country_of_origin: Some(Some("Greece".to_string())),
                gender: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.country_of_origin.as_deref(), Some("Greece"));
        assert_eq!(updated.gender, None);
        assert_eq!(updated.name, "Zeus");
        assert!(updated.date_modified >= entity.date_modified);
        assert_eq!(updated.date_created, entity.date_created);

        let err = EntityRepository::update(&db, entity.id + 100, EntityPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_cascades_to_details() {
        let db = test_connection().await;
        let entity = EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap();

        assert!(EntityRepository::delete(&db, entity.id).await.unwrap());
        let left = divinity_details::Entity::find().count(&db).await.unwrap();
        assert_eq!(left, 0);
        assert!(!EntityRepository::delete(&db, entity.id).await.unwrap());
    }

    #[tokio::test]
    async fn removing_creator_keeps_entity() {
        let db = test_connection().await;
        let user = UserRepository::create(&db, "hesiod", None).await.unwrap();
        let entity = EntityRepository::create_with_details(&db, zeus(), Some(user.id))
            .await
            .unwrap();
        assert_eq!(entity.created_by, Some(user.id));

        UserRepository::delete(&db, user.id).await.unwrap();
        let record = EntityRepository::find_with_details(&db, entity.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.entity.created_by, None);
    }

    #[tokio::test]
    async fn list_filters_by_type() {
        let db = test_connection().await;
        EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap();
        let heracles = NewEntity::new("Heracles", EntityDetails::Hero(HeroDetails::default()));
        EntityRepository::create_with_details(&db, heracles, None)
            .await
            .unwrap();

        let all = EntityRepository::list(&db, None).await.unwrap();
        let names: Vec<_> = all.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Heracles", "Zeus"]);

        let heroes = EntityRepository::list(&db, Some(EntityType::Hero))
            .await
            .unwrap();
        assert_eq!(heroes.len(), 1);
        assert!(EntityRepository::find_by_name(&db, "Heracles", EntityType::Hero)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn malformed_list_column_reads_as_empty() {
        let db = test_connection().await;
        let entity = EntityRepository::create_with_details(&db, zeus(), None)
            .await
            .unwrap();
        db.execute_unprepared("UPDATE entities SET parents = 'Kronos, Rhea';")
            .await
            .unwrap();

        let record = EntityRepository::find_with_details(&db, entity.id)
            .await
            .unwrap()
            .unwrap();
        assert!(record.parents().is_empty());
        assert_eq!(from_json_list(r#"["Kronos","Rhea"]"#), vec!["Kronos", "Rhea"]);
    }
}
