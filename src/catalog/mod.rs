pub mod model;

pub use model::{
    DivinityDetails, EntityDetails, EntityPatch, EntityType, Gender, HeroDetails,
    MythicalCreatureDetails, NewEntity,
};
