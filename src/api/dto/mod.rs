//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request DTOs
//! - `token` - Token-related request DTOs
//! - `error` - Common error response DTO

mod error;
mod token;
mod user;

pub use error::ErrorResponse;
pub use token::CreateTokenRequest;
pub use user::{CreateUserRequest, PhoneQuery, UpdateUserRequest};
