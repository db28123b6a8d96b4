//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistrar: Send + Sync {
    /// Create a `user`-role account, or fail with an `email_in_use` error.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
