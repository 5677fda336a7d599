use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
};
use uuid::Uuid;

use crate::{entity, error::UserResult, models::User, repository::UserRepository};

/// SeaORM-backed repository. Every mutating call commits on its own.
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, mut user: User) -> UserResult<User> {
        user.id = Uuid::now_v7();

        let active_model: entity::ActiveModel = user.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find().all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, user: User) -> UserResult<Option<User>> {
        let Some(model) = entity::Entity::find_by_id(user.id).one(&self.db).await? else {
            return Ok(None);
        };

        let id = model.id;
        let mut active_model = model.into_active_model();
        active_model.apply(user);
        let updated = active_model.update(&self.db).await?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
