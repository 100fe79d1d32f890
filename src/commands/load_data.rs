use crate::import::{self, ImportReport, RecordOutcome, RecordStatus};
use sea_orm::DatabaseConnection;
use std::path::Path;

pub async fn run(
    db: &DatabaseConnection,
    json_file: &Path,
    user: Option<&str>,
) -> anyhow::Result<()> {
    let report = import::load_data(db, json_file, user).await?;
    for line in describe(&report) {
        println!("{}", line);
    }
    Ok(())
}

/// Operator report: one line per record in input order, then the totals.
fn describe(report: &ImportReport) -> Vec<String> {
    let mut lines: Vec<String> = report.outcomes.iter().map(describe_outcome).collect();
    lines.push(format!(
        "Import finished: {} created, {} skipped, {} failed.",
        report.created(),
        report.skipped(),
        report.failed()
    ));
    lines
}

fn describe_outcome(outcome: &RecordOutcome) -> String {
    match &outcome.status {
        RecordStatus::Created { entity_type, .. } => format!(
            "Created entity '{}' of type '{}'.",
            outcome.name,
            entity_type.as_str()
        ),
        RecordStatus::Skipped(e) => format!("Skipped entity '{}': {}.", outcome.name, e),
        RecordStatus::Failed(e) => format!("Error creating entity '{}': {}.", outcome.name, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntityType;
    use crate::import::RecordError;

    fn outcome(index: usize, name: &str, status: RecordStatus) -> RecordOutcome {
        RecordOutcome {
            index,
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn reports_every_record_then_totals() {
        let report = ImportReport {
            outcomes: vec![
                outcome(
                    0,
                    "Zeus",
                    RecordStatus::Created {
                        id: 1,
                        entity_type: EntityType::Divinity,
                    },
                ),
                outcome(
                    1,
                    "Unknown",
                    RecordStatus::Skipped(RecordError::UnrecognizedEntityType(Some(
                        "Monster".to_string(),
                    ))),
                ),
                outcome(
                    2,
                    "Chimera",
                    RecordStatus::Failed(RecordError::MissingRequiredField("habitat")),
                ),
            ],
        };

        assert_eq!(
            describe(&report),
            vec![
                "Created entity 'Zeus' of type 'Divinity'.",
                "Skipped entity 'Unknown': invalid entity_type 'Monster'.",
                "Error creating entity 'Chimera': missing required field 'habitat'.",
                "Import finished: 1 created, 1 skipped, 1 failed.",
            ]
        );
    }
}
