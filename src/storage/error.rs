use crate::catalog::EntityType;
use crate::media::ImageError;
use sea_orm::{DbErr, SqlErr};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0} already exists")]
    Duplicate(String),
    #[error(
        "{} details cannot be attached to entity {id} of type {}",
        .found.as_str(),
        .expected.as_str()
    )]
    DetailKindMismatch {
        id: i32,
        expected: EntityType,
        found: EntityType,
    },
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error("media storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Maps a unique-constraint violation to [`StoreError::Duplicate`], keeping
/// every other database error as is.
pub(crate) fn duplicate_or_db(err: DbErr, what: impl FnOnce() -> String) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::Duplicate(what())
    } else {
        StoreError::Db(err)
    }
}
