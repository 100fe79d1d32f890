use crate::catalog::EntityType;
use crate::import::error::{ImportError, RecordError};
use crate::import::record::{entity_type_of, parse_record, record_name};
use crate::storage::repository::{EntityRepository, UserRepository};
use log::{error, info, warn};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use std::path::Path;

#[derive(Debug)]
pub enum RecordStatus {
    Created { id: i32, entity_type: EntityType },
    Skipped(RecordError),
    Failed(RecordError),
}

#[derive(Debug)]
pub struct RecordOutcome {
    /// Position in the input array.
    pub index: usize,
    pub name: String,
    pub status: RecordStatus,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl ImportReport {
    pub fn created(&self) -> usize {
        self.count(|s| matches!(s, RecordStatus::Created { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, RecordStatus::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, RecordStatus::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&RecordStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Imports every entity described in the JSON file at `path`.
///
/// The creator, the file and the document are all checked before the first
/// record is touched; any problem there aborts the run. After that each record
/// is committed on its own and a bad record only shows up in the report.
pub async fn load_data(
    db: &DatabaseConnection,
    path: &Path,
    username: Option<&str>,
) -> Result<ImportReport, ImportError> {
    let created_by = match username {
        Some(username) => {
            let user = UserRepository::find_by_username(db, username)
                .await?
                .ok_or_else(|| ImportError::UnknownCreatorUser(username.to_string()))?;
            Some(user.id)
        }
        None => None,
    };

    let records = read_document(path).await?;
    info!(
        "importing {} record(s) from {}",
        records.len(),
        path.display()
    );

    let mut report = ImportReport::default();
    for (index, value) in records.iter().enumerate() {
        let outcome = import_record(db, index, value, created_by).await;
        report.outcomes.push(outcome);
    }

    info!(
        "import finished: {} created, {} skipped, {} failed",
        report.created(),
        report.skipped(),
        report.failed()
    );
    Ok(report)
}

async fn read_document(path: &Path) -> Result<Vec<Value>, ImportError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::FileNotFound(path.to_path_buf())
        } else {
            ImportError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let document: Value = serde_json::from_str(&raw).map_err(|e| ImportError::MalformedInput {
        message: e.to_string(),
        line: Some(e.line()),
        column: Some(e.column()),
    })?;

    match document {
        Value::Array(records) => Ok(records),
        _ => Err(ImportError::MalformedInput {
            message: "expected a list of entities at the top level".to_string(),
            line: None,
            column: None,
        }),
    }
}

async fn import_record(
    db: &DatabaseConnection,
    index: usize,
    value: &Value,
    created_by: Option<i32>,
) -> RecordOutcome {
    let name = record_name(value);

    // an unknown type is a skip, not a failure
    if let Some(obj) = value.as_object() {
        if let Err(e) = entity_type_of(obj) {
            warn!("{} for entity '{}'. Skipping.", e, name);
            return RecordOutcome {
                index,
                name,
                status: RecordStatus::Skipped(e),
            };
        }
    }

    let result = match parse_record(value) {
        Ok(new) => EntityRepository::create_with_details(db, new, created_by)
            .await
            .map_err(RecordError::from),
        Err(e) => Err(e),
    };

    let status = match result {
        Ok(entity) => {
            info!(
                "Created entity '{}' of type '{}'.",
                entity.name,
                entity.entity_type.as_str()
            );
            RecordStatus::Created {
                id: entity.id,
                entity_type: entity.entity_type,
            }
        }
        Err(e) => {
            error!("Error creating entity '{}': {}", name, e);
            RecordStatus::Failed(e)
        }
    };

    RecordOutcome {
        index,
        name,
        status,
    }
}
