//! Driving port for parcel writes.

use async_trait::async_trait;

use crate::domain::{DeliveryStatus, Error, Parcel, ParcelDraft, ParcelId, UserId};

/// Use-case port for creating parcels and moving them through statuses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelCommand: Send + Sync {
    /// Validate `draft` and store a new `pending` parcel owned by `user_id`.
    async fn create_parcel(&self, user_id: &UserId, draft: ParcelDraft) -> Result<Parcel, Error>;

    /// Overwrite a parcel's status.
    ///
    /// Any status is accepted. Unknown ids fail with a `parcel_not_found`
    /// error and leave the store unchanged.
    async fn update_parcel_status(
        &self,
        id: &ParcelId,
        status: DeliveryStatus,
    ) -> Result<Parcel, Error>;
}
