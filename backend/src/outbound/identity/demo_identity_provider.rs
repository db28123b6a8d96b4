//! Demo identity provider.
//!
//! Two hardcoded accounts can sign in. Registration fabricates a `user`
//! account without storing it anywhere, refusing only the demo emails.
//! Emails are compared byte for byte, with no case folding or trimming.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CredentialVerifier, RandomSource, UserRegistrar, base36};
use crate::domain::{Error, LoginCredentials, Registration, Role, User, UserId};

/// Length of the random part of registered user ids.
const USER_ID_SUFFIX_LEN: usize = 7;

/// A built-in account that can sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

impl DemoAccount {
    /// Administrator able to approve parcels.
    pub const ADMIN: Self = Self {
        id: "admin-123",
        name: "Admin User",
        email: "admin@evoexpress.com",
        password: "password",
        role: Role::Admin,
    };

    /// Regular customer.
    pub const USER: Self = Self {
        id: "user-456",
        name: "Regular User",
        email: "user@example.com",
        password: "password",
        role: Role::User,
    };

    /// Every demo account.
    pub const ALL: [Self; 2] = [Self::ADMIN, Self::USER];

    fn to_user(self) -> Result<User, Error> {
        User::try_from_strings(self.id, self.name, self.email, self.role)
            .map_err(|err| Error::internal(format!("invalid demo account {}: {err}", self.id)))
    }

    fn owns_email(&self, email: &str) -> bool {
        self.email == email
    }
}

/// Identity provider implementing [`CredentialVerifier`] and [`UserRegistrar`].
#[derive(Clone)]
pub struct DemoIdentityProvider {
    random: Arc<dyn RandomSource>,
}

impl DemoIdentityProvider {
    /// Create a provider drawing registered ids from `random`.
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl CredentialVerifier for DemoIdentityProvider {
    async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let email = credentials.email();
        let account = DemoAccount::ALL
            .into_iter()
            .find(|account| account.owns_email(email) && account.password == credentials.password());
        match account {
            Some(account) => account.to_user(),
            None => {
                debug!("credentials rejected");
                Err(Error::invalid_credentials())
            }
        }
    }
}

#[async_trait]
impl UserRegistrar for DemoIdentityProvider {
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let email = registration.email();
        if DemoAccount::ALL
            .iter()
            .any(|account| account.owns_email(email.as_ref()))
        {
            return Err(Error::email_in_use(email.as_ref()));
        }

        let id = UserId::new(format!(
            "user-{}",
            base36(self.random.as_ref(), USER_ID_SUFFIX_LEN)
        ))
        .map_err(|err| Error::internal(format!("generated user id rejected: {err}")))?;
        Ok(User::new(
            id,
            registration.name().clone(),
            email.clone(),
            Role::User,
        ))
    }
}
