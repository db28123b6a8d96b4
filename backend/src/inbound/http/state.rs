//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AuthSession;
use crate::domain::ports::{CredentialVerifier, ParcelCommand, ParcelQuery, UserRegistrar};
use crate::inbound::http::session::SessionContext;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub parcels: Arc<dyn ParcelCommand>,
    pub parcels_query: Arc<dyn ParcelQuery>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub registrar: Arc<dyn UserRegistrar>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub parcels: Arc<dyn ParcelCommand>,
    pub parcels_query: Arc<dyn ParcelQuery>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub registrar: Arc<dyn UserRegistrar>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from the port bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            parcels,
            parcels_query,
            credentials,
            registrar,
        } = ports;
        Self {
            parcels,
            parcels_query,
            credentials,
            registrar,
        }
    }

    /// Bind the identity ports to one request's cookie session.
    pub fn auth_session(&self, session: SessionContext) -> AuthSession<SessionContext> {
        AuthSession::new(
            session,
            Arc::clone(&self.credentials),
            Arc::clone(&self.registrar),
        )
    }
}
