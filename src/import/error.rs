use crate::storage::StoreError;
use std::path::PathBuf;

/// Problems that stop an import before any record is written.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("file \"{}\" not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("cannot read \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error decoding JSON: {message}")]
    MalformedInput {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },
    #[error("user \"{0}\" does not exist")]
    UnknownCreatorUser(String),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Problems confined to a single record; the batch carries on.
#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("invalid entity_type {}", describe_type(.0))]
    UnrecognizedEntityType(Option<String>),
    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),
    #[error("field '{field}': {problem}")]
    InvalidField {
        field: &'static str,
        problem: String,
    },
    #[error("{0} already exists")]
    DuplicateEntity(String),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(what) => RecordError::DuplicateEntity(what),
            other => RecordError::Store(other),
        }
    }
}

fn describe_type(raw: &Option<String>) -> String {
    match raw {
        Some(t) => format!("'{}'", t),
        None => "(missing)".to_string(),
    }
}
