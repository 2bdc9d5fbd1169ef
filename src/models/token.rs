use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Length of every issued token identifier.
pub const TOKEN_ID_LENGTH: usize = 20;

/// Lifetime of an issued token: one hour.
pub const TOKEN_TTL_MS: i64 = 60 * 60 * 1000;

/// Bearer session token as stored under `tokens/<id>.json`.
///
/// `expires` is an absolute Unix timestamp in milliseconds. Expired tokens
/// are not purged; validity is decided when a token is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub phone: String,
    pub id: String,
    pub expires: i64,
}

impl Token {
    /// Issues a fresh token for `phone`, valid for [`TOKEN_TTL_MS`] from `now_ms`.
    pub fn issue(phone: impl Into<String>, now_ms: i64) -> Self {
        Self {
            phone: phone.into(),
            id: random_id(TOKEN_ID_LENGTH),
            expires: now_ms.saturating_add(TOKEN_TTL_MS),
        }
    }

    /// A token is usable strictly before its expiry instant.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires
    }
}

fn random_id(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HOUR_MS: i64 = 3_600_000;

    #[test]
    fn test_lifetime_is_one_hour() {
        assert_eq!(TOKEN_TTL_MS, HOUR_MS);
    }

    #[test]
    fn test_issue_sets_id_and_expiry() {
        let token = Token::issue("1234567890", 1_000);
        assert_eq!(token.phone, "1234567890");
        assert_eq!(token.id.len(), TOKEN_ID_LENGTH);
        assert!(token.id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(token.expires, 1_000 + HOUR_MS);
    }

    #[test]
    fn test_issued_ids_differ() {
        let a = Token::issue("1234567890", 0);
        let b = Token::issue("1234567890", 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_validity_boundary() {
        let issued_at = 1_700_000_000_000;
        let token = Token::issue("1234567890", issued_at);
        assert!(token.is_valid_at(issued_at));
        assert!(token.is_valid_at(issued_at + HOUR_MS - 1));
        assert!(!token.is_valid_at(issued_at + HOUR_MS));
        assert!(!token.is_valid_at(issued_at + HOUR_MS + 1));
    }

    proptest! {
        #[test]
        fn prop_valid_exactly_within_ttl(issued_at in 0i64..4_000_000_000_000, offset in 0i64..(2 * HOUR_MS)) {
            let token = Token::issue("1234567890", issued_at);
            prop_assert_eq!(token.is_valid_at(issued_at + offset), offset < HOUR_MS);
        }
    }
}
