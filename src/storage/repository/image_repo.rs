use crate::media::{numbered_filename, sanitize_filename, upload_path, validate_image};
use crate::storage::entity::entity_image;
use crate::storage::entity::image_with_caption::{
    self, ActiveModel as ImageActiveModel, Entity as ImageWithCaption,
};
use crate::storage::entity::myth_entity::Entity as MythEntity;
use crate::storage::error::StoreError;
use chrono::Utc;
use log::{info, warn};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait, Set,
    TransactionTrait,
};
use std::io::ErrorKind;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// An uploaded image file.
pub struct NewImage<'a> {
    pub filename: &'a str,
    pub bytes: &'a [u8],
    pub caption: Option<String>,
}

pub struct ImageRepository;

impl ImageRepository {
    /// Validates and stores an image under `media_root`, records it, and links
    /// it to `owner` when one is given.
    ///
    /// An existing file is never overwritten: a taken name gets a numeric
    /// suffix. The file is removed again if the database write fails.
    pub async fn create(
        db: &DatabaseConnection,
        media_root: &Path,
        owner: Option<i32>,
        image: NewImage<'_>,
    ) -> Result<image_with_caption::Model, StoreError> {
        validate_image(image.bytes)?;

        if let Some(entity_id) = owner {
            if MythEntity::find_by_id(entity_id).one(db).await?.is_none() {
                return Err(StoreError::NotFound(format!("entity {}", entity_id)));
            }
        }

        let relative = write_new_file(media_root, owner, image.filename, image.bytes).await?;

        match insert_row(db, owner, &relative, image.caption).await {
            Ok(model) => {
                info!("stored image {} as {}", model.id, relative);
                Ok(model)
            }
            Err(err) => {
                if let Err(e) = tokio::fs::remove_file(media_root.join(&relative)).await {
                    warn!("could not remove orphaned upload {}: {}", relative, e);
                }
                Err(err.into())
            }
        }
    }

    /// Links an existing image to an entity. Linking twice is a no-op.
    pub async fn attach(
        db: &DatabaseConnection,
        entity_id: i32,
        image_id: i32,
    ) -> Result<(), DbErr> {
        link(db, entity_id, image_id).await
    }

    pub async fn images_for(
        db: &DatabaseConnection,
        entity_id: i32,
    ) -> Result<Vec<image_with_caption::Model>, DbErr> {
        match MythEntity::find_by_id(entity_id).one(db).await? {
            Some(entity) => entity.find_related(ImageWithCaption).all(db).await,
            None => Ok(Vec::new()),
        }
    }
}

/// Creates the file with `create_new` so a concurrent or earlier upload of the
/// same name is never clobbered. Returns the path relative to `media_root`.
async fn write_new_file(
    media_root: &Path,
    owner: Option<i32>,
    filename: &str,
    bytes: &[u8],
) -> Result<String, StoreError> {
    let filename = sanitize_filename(filename);
    let mut n = 0;
    loop {
        let relative = upload_path(owner, &numbered_filename(&filename, n));
        let target = media_root.join(&relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
        {
            Ok(mut file) => {
                if let Err(e) = write_all(&mut file, bytes).await {
                    drop(file);
                    let _ = tokio::fs::remove_file(&target).await;
                    return Err(e.into());
                }
                return Ok(relative);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

async fn write_all(file: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await
}

async fn insert_row(
    db: &DatabaseConnection,
    owner: Option<i32>,
    relative: &str,
    caption: Option<String>,
) -> Result<image_with_caption::Model, DbErr> {
    let txn = db.begin().await?;
    let model = ImageActiveModel {
        image: Set(Some(relative.to_string())),
        caption: Set(caption),
        created_at: Set(Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    if let Some(entity_id) = owner {
        link(&txn, entity_id, model.id).await?;
    }
    txn.commit().await?;
    Ok(model)
}

async fn link<C>(conn: &C, entity_id: i32, image_id: i32) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let am = entity_image::ActiveModel {
        entity_id: Set(entity_id),
        image_id: Set(image_id),
    };
    entity_image::Entity::insert(am)
        .on_conflict(
            OnConflict::columns([entity_image::Column::EntityId, entity_image::Column::ImageId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
