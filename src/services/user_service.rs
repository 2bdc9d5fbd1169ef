//! User service for business logic operations.
//!
//! Translates validated user requests into store operations and store
//! failures into client-facing errors.

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User, UserChanges, UserProfile};
use crate::repositories::UserRepository;
use crate::utils::PasswordHasher;

const USER_EXISTS: &str = "A user with that phone number already exists";

/// User service for handling user-related business logic.
#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(repo: UserRepository, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    /// Creates a new user.
    ///
    /// The lookup beforehand only saves a hash computation on the common
    /// duplicate case. Uniqueness itself is decided by the store's
    /// exclusive create, so a create losing a race is still a conflict.
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<()> {
        match self.repo.find_by_phone(&new_user.phone).await {
            Ok(_) => return Err(AppError::conflict(USER_EXISTS)),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(AppError::storage("Could not create the new user", e)),
        }

        let hashed_password = self.hasher.hash(&new_user.password)?;
        let user = User {
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            phone: new_user.phone,
            hashed_password,
            tos_agreement: true,
        };

        self.repo.create(&user).await.map_err(|e| {
            if e.is_already_exists() {
                AppError::conflict(USER_EXISTS)
            } else {
                AppError::storage("Could not create the new user", e)
            }
        })?;

        tracing::info!(phone = %user.phone, "User created");
        Ok(())
    }

    /// Gets a user by phone number, without the password hash.
    pub async fn get_user(&self, phone: &str) -> AppResult<UserProfile> {
        match self.repo.find_by_phone(phone).await {
            Ok(user) => Ok(UserProfile::from(user)),
            Err(e) if e.is_not_found() => Err(AppError::NotFound {
                entity: "user".to_string(),
                field: "phone".to_string(),
                value: phone.to_string(),
            }),
            Err(e) => Err(AppError::storage("Could not read the specified user", e)),
        }
    }

    /// Applies the supplied changes to an existing user.
    ///
    /// Read-modify-write without locking: two concurrent updates of the
    /// same user race and the last write wins.
    pub async fn update_user(&self, phone: &str, changes: UserChanges) -> AppResult<()> {
        let mut user = match self.repo.find_by_phone(phone).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                return Err(AppError::bad_request("The specified user does not exist"));
            }
            Err(e) => return Err(AppError::storage("Could not update the user", e)),
        };

        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(password) = changes.password {
            user.hashed_password = self.hasher.hash(&password)?;
        }

        self.repo.update(&user).await.map_err(|e| {
            if e.is_not_found() {
                AppError::bad_request("The specified user does not exist")
            } else {
                AppError::storage("Could not update the user", e)
            }
        })?;

        tracing::info!(phone = %phone, "User updated");
        Ok(())
    }

    /// Deletes a user. Tokens issued to the user are left in place.
    pub async fn delete_user(&self, phone: &str) -> AppResult<()> {
        if let Err(e) = self.repo.find_by_phone(phone).await {
            tracing::debug!(phone = %phone, error = %e, "User lookup before delete failed");
            return Err(AppError::bad_request("Could not find the specified user"));
        }

        self.repo.delete(phone).await.map_err(|e| {
            if e.is_not_found() {
                AppError::bad_request("Could not find the specified user")
            } else {
                AppError::storage("Could not delete the specified user", e)
            }
        })?;

        tracing::info!(phone = %phone, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Collection, FileStore};
    use tempfile::TempDir;

    async fn setup() -> (TempDir, FileStore, UserService) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let service = UserService::new(
            UserRepository::new(store.clone()),
            PasswordHasher::new("test-secret"),
        );
        (dir, store, service)
    }

    fn new_user(phone: &str) -> NewUser {
        NewUser {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            phone: phone.to_string(),
            password: "x".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_hashed_password() {
        let (_dir, store, service) = setup().await;
        service.create_user(new_user("1234567890")).await.unwrap();

        let stored: User = store.read(Collection::Users, "1234567890").await.unwrap();
        assert_eq!(stored.first_name, "A");
        assert!(stored.tos_agreement);
        assert_ne!(stored.hashed_password, "x");
        assert_eq!(
            stored.hashed_password,
            PasswordHasher::new("test-secret").hash("x").unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let (_dir, _store, service) = setup().await;
        service.create_user(new_user("1234567890")).await.unwrap();

        let err = service.create_user(new_user("1234567890")).await.unwrap_err();
        match err {
            AppError::Conflict { message } => assert_eq!(message, USER_EXISTS),
            other => panic!("Expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_single_success() {
        let (_dir, _store, service) = setup().await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.create_user(new_user("5555555555")).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(AppError::Conflict { .. }) => {}
                Err(other) => panic!("Unexpected error: {other:?}"),
            }
        }
        assert_eq!(successes, 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_dir, _store, service) = setup().await;
        let err = service.get_user("0000000000").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_corrupt_record_is_internal() {
        let (dir, _store, service) = setup().await;
        std::fs::write(dir.path().join("users/1234567890.json"), "garbage").unwrap();

        let err = service.get_user("1234567890").await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields() {
        let (_dir, store, service) = setup().await;
        service.create_user(new_user("1234567890")).await.unwrap();

        let changes = UserChanges {
            last_name: Some("C".to_string()),
            password: Some("y".to_string()),
            ..Default::default()
        };
        service.update_user("1234567890", changes).await.unwrap();

        let stored: User = store.read(Collection::Users, "1234567890").await.unwrap();
        assert_eq!(stored.first_name, "A");
        assert_eq!(stored.last_name, "C");
        assert_eq!(
            stored.hashed_password,
            PasswordHasher::new("test-secret").hash("y").unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let (dir, _store, service) = setup().await;
        let changes = UserChanges {
            first_name: Some("Z".to_string()),
            ..Default::default()
        };

        let err = service.update_user("0000000000", changes).await.unwrap_err();
        match err {
            AppError::BadRequest { message } => {
                assert_eq!(message, "The specified user does not exist");
            }
            other => panic!("Expected BadRequest, got {other:?}"),
        }
        assert!(!dir.path().join("users/0000000000.json").exists());
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let (_dir, _store, service) = setup().await;
        service.create_user(new_user("1234567890")).await.unwrap();
        service.delete_user("1234567890").await.unwrap();

        assert!(matches!(
            service.get_user("1234567890").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let (_dir, _store, service) = setup().await;
        let err = service.delete_user("0000000000").await.unwrap_err();
        match err {
            AppError::BadRequest { message } => {
                assert_eq!(message, "Could not find the specified user");
            }
            other => panic!("Expected BadRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_traversal_phone_is_bad_request() {
        let (_dir, _store, service) = setup().await;
        let err = service.create_user(new_user("../../etc0")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
