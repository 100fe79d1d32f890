use crate::storage::entity::user::{self, ActiveModel as UserActiveModel, Entity as User};
use crate::storage::error::{duplicate_or_db, StoreError};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct UserRepository;

impl UserRepository {
    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        email: Option<String>,
    ) -> Result<user::Model, StoreError> {
        let now = Utc::now().timestamp();
        let active_model = UserActiveModel {
            username: Set(username.to_string()),
            email: Set(email),
            is_active: Set(true),
            last_login: Set(None),
            date_joined: Set(now),
            ..Default::default()
        };

        active_model
            .insert(db)
            .await
            .map_err(|e| duplicate_or_db(e, || format!("user '{}'", username)))
    }

    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<user::Model>, sea_orm::DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<user::Model>, sea_orm::DbErr> {
        User::find_by_id(id).one(db).await
    }

    /// Entities created by the user keep existing with `created_by` cleared.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, sea_orm::DbErr> {
        let res = User::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::connection::test_connection;

    #[tokio::test]
    async fn usernames_are_unique() {
        let db = test_connection().await;
        let first = UserRepository::create(&db, "hesiod", None).await.unwrap();
        assert!(first.is_active);

        let err = UserRepository::create(&db, "hesiod", Some("h@example.org".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn lookup_by_username() {
        let db = test_connection().await;
        let created = UserRepository::create(&db, "homer", None).await.unwrap();

        let found = UserRepository::find_by_username(&db, "homer").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
        assert!(UserRepository::find_by_username(&db, "ovid")
            .await
            .unwrap()
            .is_none());
    }
}
