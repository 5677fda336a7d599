use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence.
///
/// A missing record is a normal outcome (`None`/`false`); only storage
/// failures are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user under a freshly generated id
    async fn create(&self, user: User) -> UserResult<User>;

    async fn list(&self) -> UserResult<Vec<User>>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Overwrite every field except the id of the record with `user.id`
    async fn update(&self, user: User) -> UserResult<Option<User>>;

    /// Returns true if a record existed and was removed
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Exact, case-sensitive match
    async fn find_by_email(&self, email: &str) -> UserResult<Vec<User>>;
}

/// In-memory implementation of UserRepository (for development/testing).
///
/// Keeps insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> UserResult<User> {
        user.id = Uuid::now_v7();

        let mut users = self.users.write().await;
        users.push(user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, user: User) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(existing) = users.iter_mut().find(|u| u.id == user.id) else {
            return Ok(None);
        };

        existing.first_name = user.first_name;
        existing.last_name = user.last_name;
        existing.email = user.email;
        existing.date_of_birth = user.date_of_birth;
        existing.phone_number = user.phone_number;

        tracing::info!(user_id = %existing.id, "Updated user");
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        match users.iter().position(|u| u.id == id) {
            Some(index) => {
                users.remove(index);
                tracing::info!(user_id = %id, "Deleted user");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.email == email).cloned().collect())
    }
}
