use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Keyed password hasher (HMAC-SHA256 under the shared hashing secret).
///
/// Hashing is deterministic for a given secret, which is what lets a
/// stored hash be compared against a freshly supplied password.
#[derive(Clone)]
pub struct PasswordHasher {
    secret: Vec<u8>,
}

impl PasswordHasher {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Hash a password into a lowercase hex digest
    ///
    /// # Example
    /// ```ignore
    /// let hashed = hasher.hash("my_secure_password")?;
    /// ```
    pub fn hash(&self, password: &str) -> AppResult<String> {
        let mut mac = self.mac()?;
        mac.update(password.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Verify a password against a stored hex digest.
    ///
    /// The digest comparison is constant-time. A stored value that is not
    /// valid hex never matches.
    pub fn verify(&self, password: &str, hashed_password: &str) -> AppResult<bool> {
        let Ok(expected) = hex::decode(hashed_password) else {
            return Ok(false);
        };
        let mut mac = self.mac()?;
        mac.update(password.as_bytes());
        Ok(mac.verify_slice(&expected).is_ok())
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::internal("Could not hash the user password", anyhow::anyhow!(e)))
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new("thisIsASecret")
    }

    #[test]
    fn test_hash_password() {
        let hash = hasher().hash("test_password_123").expect("Failed to hash password");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let first = hasher().hash("test_password_123").unwrap();
        let second = hasher().hash("test_password_123").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_depends_on_secret() {
        let a = PasswordHasher::new("secret-a").hash("same").unwrap();
        let b = PasswordHasher::new("secret-b").hash("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_password_success() {
        let hash = hasher().hash("test_password_123").unwrap();
        assert!(hasher().verify("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_failure() {
        let hash = hasher().hash("test_password_123").unwrap();
        assert!(!hasher().verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!hasher().verify("anything", "not-hex").unwrap());
        assert!(!hasher().verify("anything", "").unwrap());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", hasher());
        assert!(!rendered.contains("thisIsASecret"));
    }

    proptest! {
        #[test]
        fn prop_distinct_passwords_hash_differently(a in ".{1,32}", b in ".{1,32}") {
            prop_assume!(a != b);
            prop_assert_ne!(hasher().hash(&a).unwrap(), hasher().hash(&b).unwrap());
        }

        #[test]
        fn prop_hash_verifies_its_own_password(password in ".{1,64}") {
            let hash = hasher().hash(&password).unwrap();
            prop_assert!(hasher().verify(&password, &hash).unwrap());
        }
    }
}
