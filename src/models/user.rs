use serde::{Deserialize, Serialize};

/// User record as stored under `users/<phone>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub hashed_password: String,
    pub tos_agreement: bool,
}

/// Client-facing view of a user. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub tos_agreement: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            tos_agreement: user.tos_agreement,
        }
    }
}

/// Validated input for creating a user, before the password is hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
}

/// Fields a user update may change. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> User {
        User {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "1234567890".to_string(),
            hashed_password: "abc123".to_string(),
            tos_agreement: true,
        }
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "phone": "1234567890",
                "hashedPassword": "abc123",
                "tosAgreement": true
            })
        );
    }

    #[test]
    fn test_profile_omits_password_hash() {
        let value = serde_json::to_value(UserProfile::from(sample())).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("hashedPassword"));
        assert_eq!(object["phone"], "1234567890");
        assert_eq!(object["firstName"], "Ada");
    }
}
