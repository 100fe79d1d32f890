use crate::catalog::EntityType;
use crate::storage::repository::EntityRepository;
use sea_orm::DatabaseConnection;

pub async fn run(db: &DatabaseConnection, entity_type: Option<EntityType>) -> anyhow::Result<()> {
    let entities = EntityRepository::list(db, entity_type).await?;
    for entity in &entities {
        let origin = entity.country_of_origin.as_deref().unwrap_or("-");
        println!("{:>5}  {}  [{}]", entity.id, entity, origin);
    }
    println!("{} entit{}", entities.len(), if entities.len() == 1 { "y" } else { "ies" });
    Ok(())
}
