//! Example parcel seeding.
//!
//! Populates an empty store with synthetic parcels for demos. Seeding is an
//! explicit lifecycle call made at startup; reads never trigger it.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{ParcelRepository, ParcelRepositoryError, RandomSource, base36};
use crate::domain::{
    DeliveryAddress, DeliveryStatus, Dimensions, MAX_DELIVERY_DAYS, MIN_DELIVERY_DAYS,
    PARCEL_ID_SUFFIX_LEN, PROGRESSION, Parcel, ParcelDraft, ParcelId, ParcelSnapshot, ParcelType,
    TRACKING_DIGITS_BOUND, TrackingNumber, TrackingNumberError, UserId, calculate_price,
    estimate_delivery,
};

/// Number of parcels inserted by one seeding run.
pub const EXAMPLE_PARCEL_COUNT: u32 = 5;

const EXAMPLE_TYPES: [ParcelType; 4] = [
    ParcelType::Document,
    ParcelType::SmallPackage,
    ParcelType::MediumPackage,
    ParcelType::LargePackage,
];

/// Result of attempting to seed example parcels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Parcels were inserted.
    Applied { count: u32 },
    /// The store already held parcels; nothing was written.
    AlreadySeeded,
}

/// Errors raised while generating or storing example parcels.
#[derive(Debug, Error)]
pub enum ExampleParcelSeedingError {
    /// A generated tracking number was out of range.
    #[error("example tracking number generation failed: {0}")]
    Tracking(#[from] TrackingNumberError),
    /// The repository rejected a read or write.
    #[error("example parcel persistence error: {0}")]
    Persistence(#[from] ParcelRepositoryError),
}

fn example_address(street: &str, city: &str, postal_code: &str) -> DeliveryAddress {
    DeliveryAddress {
        street: street.to_owned(),
        city: city.to_owned(),
        state: "Metro Manila".to_owned(),
        postal_code: postal_code.to_owned(),
        country: "Philippines".to_owned(),
        additional_info: None,
    }
}

fn example_addresses() -> [DeliveryAddress; 3] {
    [
        example_address("123 Rizal Ave", "Manila", "1000"),
        example_address("456 Ayala Blvd", "Makati", "1200"),
        example_address("789 Marcos Highway", "Quezon City", "1110"),
    ]
}

/// Service that seeds synthetic parcels into an empty store.
#[derive(Clone)]
pub struct ExampleParcelSeeder<R> {
    parcels: Arc<R>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl<R> ExampleParcelSeeder<R> {
    /// Create a seeder over the given repository.
    pub fn new(parcels: Arc<R>, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            parcels,
            clock,
            random,
        }
    }

    fn pick<T: Copy>(&self, options: &[T]) -> Option<T> {
        let bound = u32::try_from(options.len()).ok()?;
        let index = usize::try_from(self.random.below(bound)).ok()?;
        options.get(index).copied()
    }

    fn span(&self, base: f64, width: u32) -> f64 {
        base + f64::from(self.random.below(width))
    }

    fn example_parcel(&self, owner: &UserId, index: u32) -> Result<Parcel, TrackingNumberError> {
        let addresses = example_addresses();
        let slot = |offset: u32| {
            let position = usize::try_from((index + offset) % 3).unwrap_or_default();
            addresses[position].clone()
        };
        let status = self.pick(&PROGRESSION).unwrap_or(DeliveryStatus::Pending);
        let weight = 0.5 + self.random.unit() * 10.0;
        let dimensions = Dimensions {
            length: self.span(10.0, 40),
            width: self.span(10.0, 30),
            height: self.span(5.0, 20),
        };
        let type_slot = usize::try_from(index).unwrap_or_default() % EXAMPLE_TYPES.len();
        let details = ParcelDraft {
            sender_name: "John Doe".to_owned(),
            sender_phone: "+63 912 345 6789".to_owned(),
            sender_email: "john@example.com".to_owned(),
            recipient_name: "Jane Smith".to_owned(),
            recipient_phone: "+63 998 765 4321".to_owned(),
            recipient_email: "jane@example.com".to_owned(),
            pickup_address: slot(0),
            delivery_address: slot(1),
            weight,
            dimensions,
            parcel_type: EXAMPLE_TYPES[type_slot],
            description: format!("Test parcel {}", index + 1),
        };

        let now = self.clock.utc();
        let offset_days = MIN_DELIVERY_DAYS
            + self
                .random
                .below(MAX_DELIVERY_DAYS - MIN_DELIVERY_DAYS + 1);
        Ok(Parcel::from(ParcelSnapshot {
            id: ParcelId::from_suffix(&base36(self.random.as_ref(), PARCEL_ID_SUFFIX_LEN)),
            user_id: owner.clone(),
            tracking_number: TrackingNumber::from_digits(
                self.random.below(TRACKING_DIGITS_BOUND),
            )?,
            price: calculate_price(weight, &dimensions),
            details,
            status,
            estimated_delivery: Some(estimate_delivery(now, offset_days)),
            created_at: now - Duration::days(i64::from(index)),
            updated_at: now - Duration::hours(12 * i64::from(index)),
            delivered_at: (status == DeliveryStatus::Delivered).then_some(now),
        }))
    }
}

impl<R> ExampleParcelSeeder<R>
where
    R: ParcelRepository,
{
    /// Insert [`EXAMPLE_PARCEL_COUNT`] parcels owned by `owner` when the
    /// store is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleParcelSeedingError`] when generation or persistence
    /// fails. Parcels inserted before the failure stay in the store.
    pub async fn seed_if_empty(
        &self,
        owner: &UserId,
    ) -> Result<SeedOutcome, ExampleParcelSeedingError> {
        let existing = self.parcels.count().await?;
        if existing > 0 {
            info!(existing, "example parcels skipped; store is not empty");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        for index in 0..EXAMPLE_PARCEL_COUNT {
            let parcel = self.example_parcel(owner, index)?;
            self.parcels.insert(&parcel).await?;
        }

        info!(
            owner = %owner,
            count = EXAMPLE_PARCEL_COUNT,
            "example parcels seeded"
        );
        Ok(SeedOutcome::Applied {
            count: EXAMPLE_PARCEL_COUNT,
        })
    }
}
