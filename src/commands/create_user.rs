use crate::storage::repository::UserRepository;
use sea_orm::DatabaseConnection;

pub async fn run(
    db: &DatabaseConnection,
    username: &str,
    email: Option<String>,
) -> anyhow::Result<()> {
    let user = UserRepository::create(db, username, email).await?;
    println!("Created user '{}' [ID: {}].", user.username, user.id);
    Ok(())
}
