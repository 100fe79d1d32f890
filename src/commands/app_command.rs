use crate::catalog::EntityType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mythdex", about = "Mythology encyclopedia data tools")]
pub struct Cli {
    /// Database URL, overrides DATABASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    /// Media directory, overrides MEDIA_ROOT
    #[arg(long, global = true, value_name = "DIR")]
    pub media_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AppCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Load entities from a JSON file into the database
    LoadData {
        /// JSON file to load data from
        json_file: PathBuf,
        /// User that creates the entities
        #[arg(long)]
        user: Option<String>,
    },
    /// Create a user that can be credited as creator
    CreateUser {
        username: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// List entities
    List {
        /// Only entities of this type ("Divinity", "Hero", "Mythical Creature")
        #[arg(long = "type", value_name = "ENTITY_TYPE")]
        entity_type: Option<EntityType>,
    },
    /// Print one entity with its details and images
    Show { id: i32 },
    /// Upload an image and attach it to an entity
    AddImage {
        entity_id: i32,
        file: PathBuf,
        #[arg(long)]
        caption: Option<String>,
    },
}
