//! Driving port for parcel reads.
//!
//! Reads never seed or otherwise mutate the store.

use async_trait::async_trait;

use crate::domain::{Error, Parcel, ParcelId, UserId};

/// Use-case port for listing and fetching parcels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelQuery: Send + Sync {
    /// Parcels created by `user_id`, in insertion order.
    async fn user_parcels(&self, user_id: &UserId) -> Result<Vec<Parcel>, Error>;

    /// Every parcel, in insertion order.
    async fn all_parcels(&self) -> Result<Vec<Parcel>, Error>;

    /// Fetch one parcel; `None` when absent.
    async fn parcel_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, Error>;
}
