//! Driving port for sign-in.
//!
//! Inbound adapters call this port to turn credentials into a user without
//! knowing where accounts live, so HTTP tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Use-case port for checking credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Return the matching account, or an `invalid_credentials` error.
    async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
