//! Parcel aggregate: shipment form data, identity, price and lifecycle
//! timestamps.
//!
//! The JSON shape matches what the tracking front end renders: camelCase
//! keys with the form fields flattened next to the lifecycle fields.

mod insights;
mod pricing;
mod status;
mod tracking;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EmailAddress, Error, UserId};

pub use insights::{AdminDashboard, ParcelFilter, UserDashboard};
pub use pricing::{
    BASE_PRICE, MAX_DELIVERY_DAYS, MIN_DELIVERY_DAYS, PRICE_PER_CUBIC_CM, PRICE_PER_KG, Price,
    calculate_price, estimate_delivery,
};
pub use status::{
    DeliveryStatus, PROGRESSION, TimelineEntry, TimelineState, UnknownStatus, parcel_progress,
    timeline,
};
pub use tracking::{
    TRACKING_DIGITS_BOUND, TRACKING_PREFIX, TRACKING_SUFFIX, TrackingNumber, TrackingNumberError,
};

/// Minimum accepted weight in kilograms.
pub const MIN_WEIGHT_KG: f64 = 0.1;
/// Minimum accepted length of each side in centimetres.
pub const MIN_SIDE_CM: f64 = 1.0;
/// Number of base36 characters after `parcel-` in generated ids.
pub const PARCEL_ID_SUFFIX_LEN: usize = 7;

/// Error raised for malformed parcel identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parcel id must be non-empty and free of whitespace")]
pub struct InvalidParcelId;

/// Internal parcel identifier, e.g. `parcel-k3j9x0a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParcelId(String);

impl ParcelId {
    /// Validate an identifier received from a caller.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidParcelId> {
        let raw = raw.into();
        if raw.is_empty() || raw.chars().any(char::is_whitespace) {
            return Err(InvalidParcelId);
        }
        Ok(Self(raw))
    }

    /// Build a generated identifier from its random suffix.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::ParcelId;
    ///
    /// assert_eq!(ParcelId::from_suffix("abc1234").as_ref(), "parcel-abc1234");
    /// ```
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Self {
        Self(format!("parcel-{suffix}"))
    }
}

impl AsRef<str> for ParcelId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ParcelId> for String {
    fn from(value: ParcelId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ParcelId {
    type Error = InvalidParcelId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Kind of shipment, used for handling and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParcelType {
    /// Letters and paperwork.
    Document,
    /// Small box.
    SmallPackage,
    /// Medium box.
    MediumPackage,
    /// Large box.
    LargePackage,
    /// Needs careful handling.
    Fragile,
    /// Spoils if delayed.
    Perishable,
}

/// Street address for pickup or delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    /// Street and house number.
    pub street: String,
    /// City or municipality; searched by parcel filters.
    pub city: String,
    /// State, province or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Country name.
    pub country: String,
    /// Free-text note for the courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Box dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dimensions {
    /// Length in cm.
    pub length: f64,
    /// Width in cm.
    pub width: f64,
    /// Height in cm.
    pub height: f64,
}

impl Dimensions {
    /// Volume in cubic centimetres.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

/// Why a shipment form was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParcelValidationError {
    /// A required text field was blank.
    #[error("{field} is required")]
    Required { field: &'static str },
    /// An email field did not match the email pattern.
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    /// A number was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    /// A number was under its minimum.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: f64 },
}

impl ParcelValidationError {
    /// Form field the error belongs to, using the dotted wire path.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::InvalidEmail { field }
            | Self::NotFinite { field }
            | Self::BelowMinimum { field, .. } => field,
        }
    }

    /// Machine-readable validation code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::InvalidEmail { .. } => "invalid_email",
            Self::NotFinite { .. } => "not_finite",
            Self::BelowMinimum { .. } => "below_minimum",
        }
    }
}

impl From<ParcelValidationError> for Error {
    fn from(value: ParcelValidationError) -> Self {
        Self::validation(value.field(), value.code(), value.to_string())
    }
}

/// Shipment request as submitted by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParcelDraft {
    pub sender_name: String,
    pub sender_phone: String,
    pub sender_email: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub recipient_email: String,
    pub pickup_address: DeliveryAddress,
    pub delivery_address: DeliveryAddress,
    /// Weight in kilograms.
    pub weight: f64,
    pub dimensions: Dimensions,
    pub parcel_type: ParcelType,
    pub description: String,
}

fn require(field: &'static str, value: &str) -> Result<(), ParcelValidationError> {
    if value.trim().is_empty() {
        Err(ParcelValidationError::Required { field })
    } else {
        Ok(())
    }
}

fn require_email(field: &'static str, value: &str) -> Result<(), ParcelValidationError> {
    require(field, value)?;
    EmailAddress::new(value)
        .map(|_| ())
        .map_err(|_| ParcelValidationError::InvalidEmail { field })
}

fn require_at_least(field: &'static str, value: f64, min: f64) -> Result<(), ParcelValidationError> {
    if !value.is_finite() {
        return Err(ParcelValidationError::NotFinite { field });
    }
    if value < min {
        return Err(ParcelValidationError::BelowMinimum { field, min });
    }
    Ok(())
}

fn require_address(
    fields: [&'static str; 5],
    address: &DeliveryAddress,
) -> Result<(), ParcelValidationError> {
    let [street, city, state, postal_code, country] = fields;
    require(street, &address.street)?;
    require(city, &address.city)?;
    require(state, &address.state)?;
    require(postal_code, &address.postal_code)?;
    require(country, &address.country)
}

impl ParcelDraft {
    /// Check required fields, email patterns and physical minimums.
    ///
    /// Fields are checked in form order and the first failure is returned.
    pub fn validate(&self) -> Result<(), ParcelValidationError> {
        require("senderName", &self.sender_name)?;
        require("senderPhone", &self.sender_phone)?;
        require_email("senderEmail", &self.sender_email)?;
        require_address(
            [
                "pickupAddress.street",
                "pickupAddress.city",
                "pickupAddress.state",
                "pickupAddress.postalCode",
                "pickupAddress.country",
            ],
            &self.pickup_address,
        )?;
        require("recipientName", &self.recipient_name)?;
        require("recipientPhone", &self.recipient_phone)?;
        require_email("recipientEmail", &self.recipient_email)?;
        require_address(
            [
                "deliveryAddress.street",
                "deliveryAddress.city",
                "deliveryAddress.state",
                "deliveryAddress.postalCode",
                "deliveryAddress.country",
            ],
            &self.delivery_address,
        )?;
        require_at_least("weight", self.weight, MIN_WEIGHT_KG)?;
        require_at_least("dimensions.length", self.dimensions.length, MIN_SIDE_CM)?;
        require_at_least("dimensions.width", self.dimensions.width, MIN_SIDE_CM)?;
        require_at_least("dimensions.height", self.dimensions.height, MIN_SIDE_CM)?;
        require("description", &self.description)
    }

    /// Price this draft would be charged.
    #[must_use]
    pub fn quote(&self) -> Price {
        calculate_price(self.weight, &self.dimensions)
    }
}

/// Every field of a parcel, used to build or restore one verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelSnapshot {
    pub id: ParcelId,
    pub user_id: UserId,
    pub tracking_number: TrackingNumber,
    pub details: ParcelDraft,
    pub status: DeliveryStatus,
    pub price: Price,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Parcel record tracked from creation to delivery or rejection.
///
/// ## Invariants
/// - `tracking_number` and `price` never change after creation.
/// - `delivered_at` is only set by a write of [`DeliveryStatus::Delivered`].
// Serialise-only: parcels are built by `open` or from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    #[schema(value_type = String, example = "parcel-k3j9x0a")]
    id: ParcelId,
    #[schema(value_type = String, example = "user-456")]
    user_id: UserId,
    #[schema(value_type = String, example = "EVO0421337PH")]
    tracking_number: TrackingNumber,
    #[serde(flatten)]
    details: ParcelDraft,
    status: DeliveryStatus,
    #[schema(value_type = u64, example = 115)]
    price: Price,
    estimated_delivery: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    delivered_at: Option<DateTime<Utc>>,
}

impl From<ParcelSnapshot> for Parcel {
    fn from(value: ParcelSnapshot) -> Self {
        let ParcelSnapshot {
            id,
            user_id,
            tracking_number,
            details,
            status,
            price,
            estimated_delivery,
            created_at,
            updated_at,
            delivered_at,
        } = value;
        Self {
            id,
            user_id,
            tracking_number,
            details,
            status,
            price,
            estimated_delivery,
            created_at,
            updated_at,
            delivered_at,
        }
    }
}

impl Parcel {
    /// Open a new `pending` parcel priced from its draft.
    ///
    /// The draft must already be validated.
    #[must_use]
    pub fn open(
        id: ParcelId,
        user_id: UserId,
        tracking_number: TrackingNumber,
        details: ParcelDraft,
        estimated_delivery: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let price = details.quote();
        Self::from(ParcelSnapshot {
            id,
            user_id,
            tracking_number,
            details,
            status: DeliveryStatus::Pending,
            price,
            estimated_delivery: Some(estimated_delivery),
            created_at: now,
            updated_at: now,
            delivered_at: None,
        })
    }

    /// Apply a status write.
    ///
    /// Any status is accepted. `updated_at` always moves to `now`;
    /// `delivered_at` moves to `now` only for [`DeliveryStatus::Delivered`].
    #[must_use]
    pub fn with_status(self, status: DeliveryStatus, now: DateTime<Utc>) -> Self {
        let delivered_at = if status == DeliveryStatus::Delivered {
            Some(now)
        } else {
            self.delivered_at
        };
        Self {
            status,
            updated_at: now,
            delivered_at,
            ..self
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ParcelId {
        &self.id
    }

    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub const fn tracking_number(&self) -> &TrackingNumber {
        &self.tracking_number
    }

    /// Form fields captured at creation.
    #[must_use]
    pub const fn details(&self) -> &ParcelDraft {
        &self.details
    }

    #[must_use]
    pub const fn status(&self) -> DeliveryStatus {
        self.status
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub const fn estimated_delivery(&self) -> Option<DateTime<Utc>> {
        self.estimated_delivery
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub const fn delivered_at(&self) -> Option<DateTime<Utc>> {
        self.delivered_at
    }

    /// Whether `user` created this parcel.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }
}
