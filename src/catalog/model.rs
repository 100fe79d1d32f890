use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of mythological figure. Stored by its display name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum EntityType {
    #[sea_orm(string_value = "Divinity")]
    Divinity,
    #[sea_orm(string_value = "Hero")]
    Hero,
    #[sea_orm(string_value = "Mythical Creature")]
    #[serde(rename = "Mythical Creature")]
    MythicalCreature,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Divinity => "Divinity",
            EntityType::Hero => "Hero",
            EntityType::MythicalCreature => "Mythical Creature",
        }
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Divinity" => Ok(EntityType::Divinity),
            "Hero" => Ok(EntityType::Hero),
            "Mythical Creature" => Ok(EntityType::MythicalCreature),
            other => Err(format!(
                "unknown entity type '{}' (expected Divinity, Hero or Mythical Creature)",
                other
            )),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Gender {
    #[sea_orm(string_value = "Male")]
    Male,
    #[sea_orm(string_value = "Female")]
    Female,
    #[sea_orm(string_value = "Androgynous")]
    Androgynous,
    #[sea_orm(string_value = "Spirit")]
    Spirit,
    #[sea_orm(string_value = "Element")]
    Element,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Androgynous => "Androgynous",
            Gender::Spirit => "Spirit",
            Gender::Element => "Element",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            // older exports spell it without the suffix
            "Androgynous" | "Androgyn" => Ok(Gender::Androgynous),
            "Spirit" => Ok(Gender::Spirit),
            "Element" => Ok(Gender::Element),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DivinityDetails {
    pub cultural_role: String,
    pub pantheon: Option<String>,
    pub alignment: Option<String>,
    pub domains: Vec<String>,
    pub main_symbols: Vec<String>,
    pub characteristics: Vec<String>,
    pub manifestations: Option<String>,
    pub symbolic_animals: Vec<String>,
    pub power_objects: Vec<String>,
    pub consorts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroDetails {
    pub titles: Option<String>,
    pub achievements: Option<String>,
    pub enemies: Vec<String>,
    pub allies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MythicalCreatureDetails {
    pub habitat: String,
    pub diet: Option<String>,
    pub size: Option<String>,
    pub weaknesses: Option<String>,
    pub strengths: Option<String>,
}

/// Type-specific extension of an entity. The variant decides the entity's
/// `entity_type`, so a pair built from it always matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityDetails {
    Divinity(DivinityDetails),
    Hero(HeroDetails),
    MythicalCreature(MythicalCreatureDetails),
}

impl EntityDetails {
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityDetails::Divinity(_) => EntityType::Divinity,
            EntityDetails::Hero(_) => EntityType::Hero,
            EntityDetails::MythicalCreature(_) => EntityType::MythicalCreature,
        }
    }
}

/// Everything needed to create an entity together with its detail record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntity {
    pub name: String,
    pub country_of_origin: Option<String>,
    pub ethnicity: Option<String>,
    pub gender: Option<Gender>,
    pub parents: Vec<String>,
    pub descendants: Vec<String>,
    pub appearance: Option<String>,
    pub story: Option<String>,
    pub powers: Option<String>,
    pub details: EntityDetails,
}

impl NewEntity {
    pub fn new(name: impl Into<String>, details: EntityDetails) -> Self {
        Self {
            name: name.into(),
            country_of_origin: None,
            ethnicity: None,
            gender: None,
            parents: Vec::new(),
            descendants: Vec::new(),
            appearance: None,
            story: None,
            powers: None,
            details,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.details.entity_type()
    }
}

/// Partial update of the top-level entity columns. `None` leaves a column
/// untouched; for nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub country_of_origin: Option<Option<String>>,
    pub ethnicity: Option<Option<String>>,
    pub gender: Option<Option<Gender>>,
    pub parents: Option<Vec<String>>,
    pub descendants: Option<Vec<String>>,
    pub appearance: Option<Option<String>>,
    pub story: Option<Option<String>>,
    pub powers: Option<Option<String>>,
}
