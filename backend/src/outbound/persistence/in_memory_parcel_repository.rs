//! In-memory `ParcelRepository` adapter.
//!
//! One instance is built per process and shared through `Arc`. Each call
//! takes the lock for a single critical section and never holds it across
//! an await. Contents are lost on restart.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{ParcelRepository, ParcelRepositoryError};
use crate::domain::{Parcel, ParcelId, UserId};

fn poisoned<T>(_: PoisonError<T>) -> ParcelRepositoryError {
    ParcelRepositoryError::query("parcel store lock poisoned")
}

/// Parcel store kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryParcelRepository {
    parcels: RwLock<Vec<Parcel>>,
}

impl InMemoryParcelRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Parcel>>, ParcelRepositoryError> {
        self.parcels.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Parcel>>, ParcelRepositoryError> {
        self.parcels.write().map_err(poisoned)
    }
}

#[async_trait]
impl ParcelRepository for InMemoryParcelRepository {
    async fn insert(&self, parcel: &Parcel) -> Result<(), ParcelRepositoryError> {
        self.write()?.push(parcel.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, ParcelRepositoryError> {
        Ok(self.read()?.iter().find(|parcel| parcel.id() == id).cloned())
    }

    async fn replace(&self, parcel: &Parcel) -> Result<(), ParcelRepositoryError> {
        let mut parcels = self.write()?;
        let slot = parcels
            .iter_mut()
            .find(|stored| stored.id() == parcel.id())
            .ok_or_else(|| ParcelRepositoryError::missing(parcel.id().as_ref()))?;
        *slot = parcel.clone();
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        Ok(self.read()?.clone())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Parcel>, ParcelRepositoryError> {
        Ok(self
            .read()?
            .iter()
            .filter(|parcel| parcel.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, ParcelRepositoryError> {
        Ok(self.read()?.len())
    }
}
