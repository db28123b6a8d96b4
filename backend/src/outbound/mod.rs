//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: process-wide in-memory parcel store
//! - **identity**: the two demo accounts plus mock registration
//! - **session**: in-process key/value session store
//!
//! Adapters translate between domain types and their storage. They hold no
//! business rules.

pub mod identity;
pub mod persistence;
pub mod session;
