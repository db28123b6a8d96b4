//! Driven port for per-client key/value session state.
//!
//! Values are opaque strings. The port is synchronous and carries no
//! `Send` bound so request-scoped stores such as cookie sessions fit it.

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// The stored value could not be read.
        Read { message: String } => "session read failed: {message}",
        /// The value could not be written.
        Write { message: String } => "session write failed: {message}",
    }
}

/// Key/value store scoped to one client.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Read the value under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: String) -> Result<(), SessionStoreError>;

    /// Delete `key`; missing keys are ignored.
    fn remove(&self, key: &str);
}
