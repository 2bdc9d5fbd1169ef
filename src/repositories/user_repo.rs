use crate::models::User;
use crate::store::{Collection, FileStore, StoreResult};

/// User records keyed by phone number.
#[derive(Clone)]
pub struct UserRepository {
    store: FileStore,
}

impl UserRepository {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, user: &User) -> StoreResult<()> {
        self.store.create(Collection::Users, &user.phone, user).await
    }

    pub async fn find_by_phone(&self, phone: &str) -> StoreResult<User> {
        self.store.read(Collection::Users, phone).await
    }

    pub async fn update(&self, user: &User) -> StoreResult<()> {
        self.store.update(Collection::Users, &user.phone, user).await
    }

    pub async fn delete(&self, phone: &str) -> StoreResult<()> {
        self.store.delete(Collection::Users, phone).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user(phone: &str) -> User {
        User {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: phone.to_string(),
            hashed_password: "hash".to_string(),
            tos_agreement: true,
        }
    }

    #[tokio::test]
    async fn test_user_lifecycle() {
        let dir = TempDir::new().unwrap();
        let repo = UserRepository::new(FileStore::open(dir.path()).await.unwrap());

        repo.create(&user("1234567890")).await.unwrap();
        assert_eq!(repo.find_by_phone("1234567890").await.unwrap(), user("1234567890"));

        let mut changed = user("1234567890");
        changed.last_name = "Byron".to_string();
        repo.update(&changed).await.unwrap();
        assert_eq!(repo.find_by_phone("1234567890").await.unwrap().last_name, "Byron");

        repo.delete("1234567890").await.unwrap();
        assert!(repo.find_by_phone("1234567890").await.unwrap_err().is_not_found());
    }
}
