use crate::models::Token;
use crate::store::{Collection, FileStore, StoreResult};

/// Session tokens keyed by token id.
#[derive(Clone)]
pub struct TokenRepository {
    store: FileStore,
}

impl TokenRepository {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, token: &Token) -> StoreResult<()> {
        self.store.create(Collection::Tokens, &token.id, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_token_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        let repo = TokenRepository::new(store.clone());

        let token = Token::issue("1234567890", 0);
        repo.create(&token).await.unwrap();
        let stored: Token = store.read(Collection::Tokens, &token.id).await.unwrap();
        assert_eq!(stored, token);
        assert!(repo.create(&token).await.unwrap_err().is_already_exists());
    }
}
