//! Identity adapters backing the credential and registration ports.

mod demo_identity_provider;

pub use demo_identity_provider::{DemoAccount, DemoIdentityProvider};
