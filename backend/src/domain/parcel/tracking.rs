//! Human-facing tracking numbers of the form `EVO<7 digits>PH`.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tracking number prefix.
pub const TRACKING_PREFIX: &str = "EVO";
/// Tracking number suffix.
pub const TRACKING_SUFFIX: &str = "PH";
/// Exclusive upper bound of the numeric part.
pub const TRACKING_DIGITS_BOUND: u32 = 10_000_000;

static TRACKING_RE: OnceLock<Regex> = OnceLock::new();

fn tracking_regex() -> &'static Regex {
    TRACKING_RE.get_or_init(|| {
        Regex::new(r"^EVO\d{7}PH$")
            .unwrap_or_else(|error| panic!("tracking number regex failed to compile: {error}"))
    })
}

/// Error raised for malformed tracking numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackingNumberError {
    /// The numeric part does not fit in seven digits.
    #[error("tracking digits {0} exceed seven places")]
    DigitsOutOfRange(u32),
    /// The string does not match `EVO<7 digits>PH`.
    #[error("malformed tracking number: {0}")]
    Malformed(String),
}

/// Tracking number assigned once at parcel creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Build a tracking number from its numeric part, zero-padded to seven digits.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::TrackingNumber;
    ///
    /// let number = TrackingNumber::from_digits(42).unwrap();
    /// assert_eq!(number.as_ref(), "EVO0000042PH");
    /// ```
    pub fn from_digits(digits: u32) -> Result<Self, TrackingNumberError> {
        if digits >= TRACKING_DIGITS_BOUND {
            return Err(TrackingNumberError::DigitsOutOfRange(digits));
        }
        Ok(Self(format!("{TRACKING_PREFIX}{digits:07}{TRACKING_SUFFIX}")))
    }

    /// Validate an existing tracking number.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TrackingNumberError> {
        let raw = raw.into();
        if tracking_regex().is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(TrackingNumberError::Malformed(raw))
        }
    }
}

impl AsRef<str> for TrackingNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TrackingNumber> for String {
    fn from(value: TrackingNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for TrackingNumber {
    type Error = TrackingNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
