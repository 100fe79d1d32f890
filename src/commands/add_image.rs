use crate::storage::repository::{ImageRepository, NewImage};
use anyhow::Context;
use sea_orm::DatabaseConnection;
use std::path::Path;

pub async fn run(
    db: &DatabaseConnection,
    media_root: &Path,
    entity_id: i32,
    file: &Path,
    caption: Option<String>,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("cannot read {}", file.display()))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let image = ImageRepository::create(
        db,
        media_root,
        Some(entity_id),
        NewImage {
            filename,
            bytes: &bytes,
            caption,
        },
    )
    .await?;
    println!(
        "Stored image {} ({}) for entity {}.",
        image.id,
        image.image.as_deref().unwrap_or_default(),
        entity_id
    );
    Ok(())
}
