//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use evo_backend::domain::UserId;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) latency: Duration,
    pub(crate) example_owner: Option<UserId>,
}

impl ServerConfig {
    /// Construct a server configuration with no simulated latency and no
    /// example seeding.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            latency: Duration::ZERO,
            example_owner: None,
        }
    }

    /// Delay every parcel store operation by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Seed example parcels owned by `owner` when the store starts empty.
    #[must_use]
    pub fn with_example_parcels(mut self, owner: UserId) -> Self {
        self.example_owner = Some(owner);
        self
    }
}
