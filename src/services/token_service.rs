//! Token service: exchanges user credentials for session tokens.

use jiff::Timestamp;

use crate::error::{AppError, AppResult};
use crate::models::Token;
use crate::repositories::{TokenRepository, UserRepository};
use crate::utils::PasswordHasher;

#[derive(Clone)]
pub struct TokenService {
    users: UserRepository,
    tokens: TokenRepository,
    hasher: PasswordHasher,
}

impl TokenService {
    pub fn new(users: UserRepository, tokens: TokenRepository, hasher: PasswordHasher) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Issues a token for `phone` if `password` matches the stored hash.
    pub async fn create_token(&self, phone: &str, password: &str) -> AppResult<Token> {
        self.create_token_at(phone, password, Timestamp::now().as_millisecond())
            .await
    }

    async fn create_token_at(&self, phone: &str, password: &str, now_ms: i64) -> AppResult<Token> {
        let user = self.users.find_by_phone(phone).await.map_err(|e| {
            tracing::debug!(phone = %phone, error = %e, "Token request for unknown user");
            AppError::bad_request("Could not find the specified user")
        })?;

        if !self.hasher.verify(password, &user.hashed_password)? {
            tracing::info!(phone = %phone, "Token request with wrong password");
            return Err(AppError::bad_request(
                "Password did not match the specified user password",
            ));
        }

        let token = Token::issue(user.phone, now_ms);
        self.tokens
            .create(&token)
            .await
            .map_err(|e| AppError::storage("Could not create the new token", e))?;

        tracing::info!(phone = %token.phone, expires = token.expires, "Token issued");
        Ok(token)
    }
}
