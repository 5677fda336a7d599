use std::sync::Arc;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;
use crate::repository::UserRepository;

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user under a new id; any id on the input is discarded.
    pub async fn create_user(&self, mut user: User) -> UserResult<User> {
        user.id = Uuid::now_v7();
        self.repository.create(user).await
    }

    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<Option<User>> {
        self.repository.get_by_id(id).await
    }

    /// Replace the record `id` with `user`, keeping the stored id.
    ///
    /// Returns `None` without writing when no such record exists.
    pub async fn update_user(&self, id: Uuid, mut user: User) -> UserResult<Option<User>> {
        let Some(existing) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        user.id = existing.id;
        self.repository.update(user).await
    }

    pub async fn delete_user(&self, id: Uuid) -> UserResult<bool> {
        self.repository.delete(id).await
    }

    pub async fn is_email_unique(&self, email: &str) -> UserResult<bool> {
        Ok(self.repository.find_by_email(email).await?.is_empty())
    }

    pub async fn list_users_with_same_email(&self, email: &str) -> UserResult<Vec<User>> {
        self.repository.find_by_email(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::NaiveDate;
    use mockall::predicate::*;

    fn user(id: Uuid, email: &str) -> User {
        User {
            id,
            first_name: "John".to_string(),
            last_name: Some("Doe".to_string()),
            email: email.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone_number: "1234567890".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_replaces_client_id() {
        let client_id = Uuid::now_v7();
        let mut mock = MockUserRepository::new();
        mock.expect_create()
            .withf(move |u| u.id != client_id && !u.id.is_nil())
            .times(1)
            .returning(|u| Ok(u));

        let service = UserService::new(mock);
        let created = service
            .create_user(user(client_id, "john@example.com"))
            .await
            .unwrap();

        assert_ne!(created.id, client_id);
    }

    #[tokio::test]
    async fn test_get_user_missing() {
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_id().times(1).returning(|_| Ok(None));

        let service = UserService::new(mock);
        assert_eq!(service.get_user(Uuid::now_v7()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_user_missing_does_not_write() {
        let id = Uuid::now_v7();
        let mut mock = MockUserRepository::new();
        mock.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_update().never();

        let service = UserService::new(mock);
        let result = service
            .update_user(id, user(id, "john@example.com"))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_update_user_keeps_stored_id() {
        let id = Uuid::now_v7();
        let body_id = Uuid::now_v7();
        let existing = user(id, "john@example.com");

        let mut mock = MockUserRepository::new();
        mock.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        mock.expect_update()
            .withf(move |u| u.id == id && u.email == "johnny@example.com")
            .times(1)
            .returning(|u| Ok(Some(u)));

        let service = UserService::new(mock);
        let updated = service
            .update_user(id, user(body_id, "johnny@example.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_delete_user_passes_through() {
        let mut mock = MockUserRepository::new();
        mock.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(mock);
        assert!(!service.delete_user(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_email_unique() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_email()
            .withf(|email| email == "taken@example.com")
            .returning(|email| Ok(vec![user(Uuid::now_v7(), email)]));
        mock.expect_find_by_email()
            .withf(|email| email == "free@example.com")
            .returning(|_| Ok(vec![]));

        let service = UserService::new(mock);
        assert!(!service.is_email_unique("taken@example.com").await.unwrap());
        assert!(service.is_email_unique("free@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_users_with_same_email() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_email()
            .returning(|email| Ok(vec![user(Uuid::now_v7(), email), user(Uuid::now_v7(), email)]));

        let service = UserService::new(mock);
        let users = service
            .list_users_with_same_email("john@example.com")
            .await
            .unwrap();

        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.email == "john@example.com"));
    }
}
