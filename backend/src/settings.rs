//! Process configuration loaded via OrthoConfig.
//!
//! Every field can come from the command line, a configuration file or an
//! `EVO_`-prefixed environment variable. Accessors supply the defaults and
//! validate values the derive cannot check.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

use crate::domain::UserId;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_PATH: &str = "/var/run/secrets/session_key";
const DEFAULT_LATENCY_MS: u64 = 500;
const DEFAULT_EXAMPLE_OWNER: &str = "user-456";
const SESSION_KEY_MIN_LEN: usize = 64;

/// Whether the binary was compiled with debug assertions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Configuration errors surfaced at startup.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid example owner id '{value}'")]
    InvalidExampleOwner { value: String },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Settings for the parcel backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVO")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`; defaults to true.
    pub cookie_secure: Option<bool>,
    /// Delay awaited before every parcel store operation.
    pub simulated_latency_ms: Option<u64>,
    /// Seed example parcels into the empty store at startup.
    #[ortho_config(default = false)]
    pub seed_example_parcels: bool,
    /// Owner of the seeded example parcels.
    pub example_owner_id: Option<String>,
}

impl AppSettings {
    /// Listen address, `0.0.0.0:8080` unless configured.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Session key file location.
    pub fn session_key_path(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_PATH))
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms.unwrap_or(DEFAULT_LATENCY_MS))
    }

    /// Owner of seeded parcels, the demo `user-456` account by default.
    pub fn example_owner(&self) -> Result<UserId, SettingsError> {
        let value = self
            .example_owner_id
            .as_deref()
            .unwrap_or(DEFAULT_EXAMPLE_OWNER);
        UserId::new(value).map_err(|_| SettingsError::InvalidExampleOwner {
            value: value.to_owned(),
        })
    }

    /// Load the cookie signing key.
    ///
    /// Debug builds fall back to an ephemeral key when the file cannot be
    /// read; release builds refuse to start.
    pub fn session_key(&self, mode: BuildMode) -> Result<Key, SettingsError> {
        load_session_key(&self.session_key_path(), mode)
    }
}

fn load_session_key(path: &Path, mode: BuildMode) -> Result<Key, SettingsError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SettingsError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode == BuildMode::Debug => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SettingsError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
