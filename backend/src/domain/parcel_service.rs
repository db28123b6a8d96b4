//! Parcel domain service.
//!
//! Implements the parcel driving ports over a [`ParcelRepository`]. Every
//! operation awaits the configured simulated latency before touching the
//! store, and repository failures are mapped onto the shared [`Error`]
//! payload.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, instrument};

use crate::domain::ports::{
    LatencySleeper, NoLatency, ParcelCommand, ParcelQuery, ParcelRepository,
    ParcelRepositoryError, RandomSource, base36,
};
use crate::domain::{
    DeliveryStatus, Error, MAX_DELIVERY_DAYS, MIN_DELIVERY_DAYS, PARCEL_ID_SUFFIX_LEN, Parcel,
    ParcelDraft, ParcelId, TRACKING_DIGITS_BOUND, TrackingNumber, UserId, estimate_delivery,
};

fn map_repository_error(error: ParcelRepositoryError) -> Error {
    match error {
        ParcelRepositoryError::Missing { id } => Error::parcel_not_found(&id),
        ParcelRepositoryError::Query { message } => {
            Error::internal(format!("parcel repository error: {message}"))
        }
    }
}

/// Parcel service implementing [`ParcelCommand`] and [`ParcelQuery`].
#[derive(Clone)]
pub struct ParcelService<R> {
    parcels: Arc<R>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    sleeper: Arc<dyn LatencySleeper>,
    latency: Duration,
}

impl<R> ParcelService<R> {
    /// Create a service with no simulated latency.
    pub fn new(parcels: Arc<R>, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            parcels,
            clock,
            random,
            sleeper: Arc::new(NoLatency),
            latency: Duration::ZERO,
        }
    }

    /// Await `latency` through `sleeper` before each operation.
    #[must_use]
    pub fn with_latency(mut self, sleeper: Arc<dyn LatencySleeper>, latency: Duration) -> Self {
        self.sleeper = sleeper;
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            self.sleeper.sleep(self.latency).await;
        }
    }

    fn next_id(&self) -> ParcelId {
        ParcelId::from_suffix(&base36(self.random.as_ref(), PARCEL_ID_SUFFIX_LEN))
    }

    fn next_tracking_number(&self) -> Result<TrackingNumber, Error> {
        TrackingNumber::from_digits(self.random.below(TRACKING_DIGITS_BOUND))
            .map_err(|err| Error::internal(format!("tracking number generation failed: {err}")))
    }

    fn next_delivery_offset(&self) -> u32 {
        MIN_DELIVERY_DAYS + self.random.below(MAX_DELIVERY_DAYS - MIN_DELIVERY_DAYS + 1)
    }
}

#[async_trait]
impl<R> ParcelCommand for ParcelService<R>
where
    R: ParcelRepository,
{
    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn create_parcel(&self, user_id: &UserId, draft: ParcelDraft) -> Result<Parcel, Error> {
        self.simulate_latency().await;
        draft.validate()?;

        let now = self.clock.utc();
        let parcel = Parcel::open(
            self.next_id(),
            user_id.clone(),
            self.next_tracking_number()?,
            draft,
            estimate_delivery(now, self.next_delivery_offset()),
            now,
        );
        self.parcels
            .insert(&parcel)
            .await
            .map_err(map_repository_error)?;

        info!(
            parcel_id = %parcel.id(),
            tracking_number = %parcel.tracking_number(),
            price = parcel.price().amount(),
            "parcel created"
        );
        Ok(parcel)
    }

    #[instrument(skip_all, fields(parcel_id = %id, status = %status))]
    async fn update_parcel_status(
        &self,
        id: &ParcelId,
        status: DeliveryStatus,
    ) -> Result<Parcel, Error> {
        self.simulate_latency().await;

        let current = self
            .parcels
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::parcel_not_found(id.as_ref()))?;
        let previous = current.status();
        let updated = current.with_status(status, self.clock.utc());
        self.parcels
            .replace(&updated)
            .await
            .map_err(map_repository_error)?;

        info!(%previous, "parcel status updated");
        Ok(updated)
    }
}

#[async_trait]
impl<R> ParcelQuery for ParcelService<R>
where
    R: ParcelRepository,
{
    async fn user_parcels(&self, user_id: &UserId) -> Result<Vec<Parcel>, Error> {
        self.simulate_latency().await;
        let parcels = self
            .parcels
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %user_id, count = parcels.len(), "listed user parcels");
        Ok(parcels)
    }

    async fn all_parcels(&self) -> Result<Vec<Parcel>, Error> {
        self.simulate_latency().await;
        self.parcels.list_all().await.map_err(map_repository_error)
    }

    async fn parcel_by_id(&self, id: &ParcelId) -> Result<Option<Parcel>, Error> {
        self.simulate_latency().await;
        self.parcels
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "parcel_service_tests.rs"]
mod tests;
