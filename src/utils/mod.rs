pub mod password;
pub mod validate;

pub use password::PasswordHasher;
