pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::user::User;
pub use models::user_status::UserStatus;

pub use error_location::ErrorLocation;
