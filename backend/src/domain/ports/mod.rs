//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`ParcelCommand`, `ParcelQuery`, `CredentialVerifier`,
//! `UserRegistrar`) are called by inbound adapters. Driven ports
//! (`ParcelRepository`, `SessionStore`, `RandomSource`, `LatencySleeper`)
//! are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_verifier;
mod latency;
mod parcel_command;
mod parcel_query;
mod parcel_repository;
mod random_source;
mod session_store;
mod user_registrar;

#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::CredentialVerifier;
pub use latency::{LatencySleeper, NoLatency, TokioSleeper};
#[cfg(test)]
pub use parcel_command::MockParcelCommand;
pub use parcel_command::ParcelCommand;
#[cfg(test)]
pub use parcel_query::MockParcelQuery;
pub use parcel_query::ParcelQuery;
#[cfg(test)]
pub use parcel_repository::MockParcelRepository;
pub use parcel_repository::{ParcelRepository, ParcelRepositoryError};
#[cfg(test)]
pub use random_source::MockRandomSource;
pub use random_source::{RandomSource, SeededRandomSource, ThreadRandomSource, base36};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use user_registrar::MockUserRegistrar;
pub use user_registrar::UserRegistrar;
