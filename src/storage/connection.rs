use crate::storage::entity::{
    divinity_details, entity_image, hero_details, image_with_caption, myth_entity,
    mythical_creature_details, user,
};
use log::info;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use std::time::Duration;

pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    if is_in_memory(db_url) {
        // every pooled connection would otherwise open its own empty database
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(10)
            .min_connections(2)
            .idle_timeout(Duration::from_secs(8))
            .max_lifetime(Duration::from_secs(8));
    }
    opt.connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Info);

    let db = Database::connect(opt).await?;

    // Enable WAL mode.
    db.execute(sea_orm::Statement::from_string(
        sea_orm::DatabaseBackend::Sqlite,
        "PRAGMA journal_mode=WAL;".to_string(),
    ))
    .await?;

    // Parents before children so foreign keys resolve.
    create_table(&db, user::Entity).await?;
    create_table(&db, myth_entity::Entity).await?;
    create_table(&db, divinity_details::Entity).await?;
    create_table(&db, hero_details::Entity).await?;
    create_table(&db, mythical_creature_details::Entity).await?;
    create_table(&db, image_with_caption::Entity).await?;
    create_table(&db, entity_image::Entity).await?;

    // One entity per (name, entity_type).
    db.execute(sea_orm::Statement::from_string(
        sea_orm::DatabaseBackend::Sqlite,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_entities_name_type ON entities(name, entity_type);"
            .to_string(),
    ))
    .await?;

    info!("Database connection established with WAL mode and tables initialized.");

    Ok(db)
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let stmt = builder.build(schema.create_table_from_entity(entity).if_not_exists());
    db.execute(stmt).await?;
    Ok(())
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

#[cfg(test)]
pub(crate) async fn test_connection() -> DatabaseConnection {
    establish_connection("sqlite::memory:")
        .await
        .expect("in-memory database")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file.db?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://mythdex.db?mode=rwc"));
    }

    #[tokio::test]
    async fn schema_is_idempotent() {
        let db = test_connection().await;
        // a second pass over an initialized database must not fail
        create_table(&db, myth_entity::Entity).await.unwrap();
        let rows = db
            .query_all(sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'idx_entities_name_type';"
                    .to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
