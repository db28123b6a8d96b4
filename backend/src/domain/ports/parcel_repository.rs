//! Driven port for parcel persistence.

use async_trait::async_trait;

use crate::domain::{Parcel, ParcelId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by parcel repository adapters.
    pub enum ParcelRepositoryError {
        /// Storage could not be read or written.
        Query { message: String } => "parcel repository query failed: {message}",
        /// A replace targeted an id that is not stored.
        Missing { id: String } => "parcel {id} is not stored",
    }
}

/// Store of parcel records in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParcelRepository: Send + Sync {
    /// Append a new parcel.
    async fn insert(&self, parcel: &Parcel) -> Result<(), ParcelRepositoryError>;

    /// Find a parcel by id.
    async fn find_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, ParcelRepositoryError>;

    /// Overwrite the stored parcel with the same id, keeping its position.
    ///
    /// Fails with [`ParcelRepositoryError::Missing`] when the id is absent.
    async fn replace(&self, parcel: &Parcel) -> Result<(), ParcelRepositoryError>;

    /// Every parcel, oldest insert first.
    async fn list_all(&self) -> Result<Vec<Parcel>, ParcelRepositoryError>;

    /// Parcels created by `user_id`, oldest insert first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Parcel>, ParcelRepositoryError>;

    /// Number of stored parcels.
    async fn count(&self) -> Result<usize, ParcelRepositoryError>;
}
