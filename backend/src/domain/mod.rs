//! Domain primitives, aggregates, services and ports.
//!
//! Purpose: define strongly typed entities used by the HTTP adapter and the
//! in-memory store, plus the services that implement the driving ports.
//! Types document their invariants and serde contracts in their Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Role and the validated auth inputs.
//! - Parcel and its status, pricing, tracking and dashboard projections.
//! - ParcelService, AuthSession, ExampleParcelSeeder and the route guard.

pub mod auth;
pub mod auth_session;
pub mod error;
pub mod example_parcels;
pub mod navigation;
pub mod parcel;
pub mod parcel_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthValidationError, LoginCredentials, PASSWORD_MIN, ProfileUpdate, Registration,
};
pub use self::auth_session::{AuthSession, SESSION_USER_KEY, SIDEBAR_COLLAPSED_KEY};
pub use self::error::{Error, ErrorCode};
pub use self::example_parcels::{
    EXAMPLE_PARCEL_COUNT, ExampleParcelSeeder, ExampleParcelSeedingError, SeedOutcome,
};
pub use self::navigation::{
    AppRoute, DASHBOARD_PATH, GuardDecision, LOGIN_PATH, RouteAccess, guard,
};
pub use self::parcel::{
    AdminDashboard, BASE_PRICE, DeliveryAddress, DeliveryStatus, Dimensions, InvalidParcelId,
    MAX_DELIVERY_DAYS, MIN_DELIVERY_DAYS, MIN_SIDE_CM, MIN_WEIGHT_KG, PARCEL_ID_SUFFIX_LEN,
    PRICE_PER_CUBIC_CM, PRICE_PER_KG, PROGRESSION, Parcel, ParcelDraft, ParcelFilter, ParcelId,
    ParcelSnapshot, ParcelType, ParcelValidationError, Price, TRACKING_DIGITS_BOUND,
    TRACKING_PREFIX, TRACKING_SUFFIX, TimelineEntry, TimelineState, TrackingNumber,
    TrackingNumberError, UnknownStatus, UserDashboard, calculate_price, estimate_delivery,
    parcel_progress, timeline,
};
pub use self::parcel_service::ParcelService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, EmailAddress, Role, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use evo_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("admin role required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
