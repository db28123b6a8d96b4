//! Signed-in user state held in a per-client session store.
//!
//! The user is kept as camelCase JSON under [`SESSION_USER_KEY`]. Nothing
//! re-validates a stored user against the identity provider; the session
//! lives until logout.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{CredentialVerifier, SessionStore, SessionStoreError, UserRegistrar};
use crate::domain::{Error, LoginCredentials, ProfileUpdate, Registration, User};

/// Session key holding the signed-in user.
pub const SESSION_USER_KEY: &str = "evo-user";
/// Session key holding the sidebar preference.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar-collapsed";

fn map_store_error(error: SessionStoreError) -> Error {
    Error::internal(format!("session store error: {error}"))
}

/// Authentication state machine over a [`SessionStore`].
pub struct AuthSession<S> {
    store: S,
    verifier: Arc<dyn CredentialVerifier>,
    registrar: Arc<dyn UserRegistrar>,
}

impl<S> AuthSession<S>
where
    S: SessionStore,
{
    /// Bind identity ports to one client's session store.
    pub fn new(
        store: S,
        verifier: Arc<dyn CredentialVerifier>,
        registrar: Arc<dyn UserRegistrar>,
    ) -> Self {
        Self {
            store,
            verifier,
            registrar,
        }
    }

    fn persist(&self, user: &User) -> Result<(), Error> {
        let json = serde_json::to_string(user)
            .map_err(|err| Error::internal(format!("failed to encode session user: {err}")))?;
        self.store
            .store(SESSION_USER_KEY, json)
            .map_err(map_store_error)
    }

    /// Restore the signed-in user from the store.
    ///
    /// A stored value that no longer decodes is logged, removed and treated
    /// as signed out.
    pub fn restore(&self) -> Result<Option<User>, Error> {
        let Some(raw) = self.store.load(SESSION_USER_KEY).map_err(map_store_error)? else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!(error = %err, "discarding unreadable session user");
                self.store.remove(SESSION_USER_KEY);
                Ok(None)
            }
        }
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        let user = self.verifier.verify(&credentials).await?;
        self.persist(&user)?;
        info!(user_id = %user.id(), role = ?user.role(), "signed in");
        Ok(user)
    }

    /// Create an account and sign it in.
    ///
    /// `confirm_password`, when supplied, must equal `password`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: Option<&str>,
    ) -> Result<User, Error> {
        let registration = Registration::try_from_parts(name, email, password, confirm_password)?;
        let user = self.registrar.register(&registration).await?;
        self.persist(&user)?;
        info!(user_id = %user.id(), "registered");
        Ok(user)
    }

    /// Forget the signed-in user.
    pub fn logout(&self) {
        self.store.remove(SESSION_USER_KEY);
    }

    /// Signed-in user, or `unauthorized`.
    pub fn require_user(&self) -> Result<User, Error> {
        self.restore()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Signed-in admin, `unauthorized` when signed out or `forbidden` for
    /// other roles.
    pub fn require_admin(&self) -> Result<User, Error> {
        let user = self.require_user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(Error::forbidden("admin role required"))
        }
    }

    /// Rewrite the signed-in user's name and email.
    pub fn update_profile(&self, name: &str, email: &str) -> Result<User, Error> {
        let (name, email) = ProfileUpdate::try_from_parts(name, email)?.into_parts();
        let user = self.require_user()?.with_profile(name, email);
        self.persist(&user)?;
        Ok(user)
    }

    /// Whether the sidebar is collapsed; defaults to expanded.
    pub fn sidebar_collapsed(&self) -> Result<bool, Error> {
        let raw = self
            .store
            .load(SIDEBAR_COLLAPSED_KEY)
            .map_err(map_store_error)?;
        Ok(raw.as_deref() == Some("true"))
    }

    /// Persist the sidebar preference as `"true"` or `"false"`.
    pub fn set_sidebar_collapsed(&self, collapsed: bool) -> Result<(), Error> {
        self.store
            .store(SIDEBAR_COLLAPSED_KEY, collapsed.to_string())
            .map_err(map_store_error)
    }
}
