//! EVO Express parcel tracking backend.
//!
//! Hexagonal layout: [`domain`] holds the parcel and session logic behind
//! ports, [`outbound`] supplies in-memory and demo adapters, and
//! [`inbound::http`] exposes the REST API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
