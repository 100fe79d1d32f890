use crate::catalog::{
    DivinityDetails, EntityDetails, EntityType, Gender, HeroDetails, MythicalCreatureDetails,
    NewEntity,
};
use crate::import::error::RecordError;
use serde_json::{Map, Value};

/// Name used in reports when a record has no usable `name`.
pub const UNKNOWN_NAME: &str = "Unknown";

pub fn record_name(value: &Value) -> String {
    value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

/// Reads the `entity_type` tag of a record.
pub fn entity_type_of(obj: &Map<String, Value>) -> Result<EntityType, RecordError> {
    match obj.get("entity_type") {
        Some(Value::String(raw)) => raw
            .parse()
            .map_err(|_| RecordError::UnrecognizedEntityType(Some(raw.clone()))),
        None | Some(Value::Null) => Err(RecordError::UnrecognizedEntityType(None)),
        Some(other) => Err(RecordError::UnrecognizedEntityType(Some(other.to_string()))),
    }
}

/// Turns one element of the input array into an entity with its details.
///
/// Absent or `null` list fields become empty lists and absent scalars stay
/// `None`. A field of the wrong JSON type fails the record.
pub fn parse_record(value: &Value) -> Result<NewEntity, RecordError> {
    let obj = value.as_object().ok_or(RecordError::NotAnObject)?;
    let entity_type = entity_type_of(obj)?;
    let fields = Fields(obj);

    let name = fields.required_str("name")?;
    let gender = fields
        .opt_str("gender")?
        .map(|g| {
            g.parse::<Gender>().map_err(|problem| RecordError::InvalidField {
                field: "gender",
                problem,
            })
        })
        .transpose()?;

    let details = match entity_type {
        EntityType::Divinity => EntityDetails::Divinity(DivinityDetails {
            cultural_role: fields.required_str("cultural_role")?,
            pantheon: fields.opt_str("pantheon")?,
            alignment: fields.opt_str("alignment")?,
            domains: fields.list("domains")?,
            main_symbols: fields.list("main_symbols")?,
            characteristics: fields.list("characteristics")?,
            manifestations: fields.opt_str("manifestations")?,
            symbolic_animals: fields.list("symbolic_animals")?,
            power_objects: fields.list("power_objects")?,
            consorts: fields.list("consorts")?,
        }),
        EntityType::Hero => EntityDetails::Hero(HeroDetails {
            titles: fields.opt_str("titles")?,
            achievements: fields.opt_str("achievements")?,
            enemies: fields.list("enemies")?,
            allies: fields.list("allies")?,
        }),
        EntityType::MythicalCreature => EntityDetails::MythicalCreature(MythicalCreatureDetails {
            habitat: fields.required_str("habitat")?,
            diet: fields.opt_str("diet")?,
            size: fields.opt_str("size")?,
            weaknesses: fields.opt_str("weaknesses")?,
            strengths: fields.opt_str("strengths")?,
        }),
    };

    Ok(NewEntity {
        name,
        country_of_origin: fields.opt_str("country_of_origin")?,
        ethnicity: fields.opt_str("ethnicity")?,
        gender,
        parents: fields.list("parents")?,
        descendants: fields.list("descendants")?,
        appearance: fields.opt_str("appearance")?,
        story: fields.opt_str("story")?,
        powers: fields.opt_str("powers")?,
        details,
    })
}

struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn opt_str(&self, key: &'static str) -> Result<Option<String>, RecordError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(RecordError::InvalidField {
                field: key,
                problem: format!("expected a string, got {}", json_kind(other)),
            }),
        }
    }

    /// Blank strings count as missing.
    fn required_str(&self, key: &'static str) -> Result<String, RecordError> {
        match self.opt_str(key)? {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(RecordError::MissingRequiredField(key)),
        }
    }

    fn list(&self, key: &'static str) -> Result<Vec<String>, RecordError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(RecordError::InvalidField {
                        field: key,
                        problem: format!("list items must be strings, got {}", json_kind(other)),
                    }),
                })
                .collect(),
            Some(other) => Err(RecordError::InvalidField {
                field: key,
                problem: format!("expected a list of strings, got {}", json_kind(other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
