pub mod add_image;
pub mod app_command;
pub mod create_user;
pub mod list;
pub mod load_data;
pub mod show;

pub use app_command::{AppCommand, Cli};

use crate::config::AppConfig;
use sea_orm::DatabaseConnection;

pub async fn run(
    command: AppCommand,
    db: &DatabaseConnection,
    config: &AppConfig,
) -> anyhow::Result<()> {
    match command {
        AppCommand::LoadData { json_file, user } => {
            load_data::run(db, &json_file, user.as_deref()).await
        }
        AppCommand::CreateUser { username, email } => create_user::run(db, &username, email).await,
        AppCommand::List { entity_type } => list::run(db, entity_type).await,
        AppCommand::Show { id } => show::run(db, id).await,
        AppCommand::AddImage {
            entity_id,
            file,
            caption,
        } => add_image::run(db, &config.media_root, entity_id, &file, caption).await,
    }
}
