//! Shipping quote: price from weight and volume, delivery estimate from an
//! offset in days.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Dimensions;

/// Flat handling fee.
pub const BASE_PRICE: f64 = 100.0;
/// Charge per kilogram.
pub const PRICE_PER_KG: f64 = 10.0;
/// Charge per cubic centimetre.
pub const PRICE_PER_CUBIC_CM: f64 = 0.001;

/// Shortest delivery estimate, in days.
pub const MIN_DELIVERY_DAYS: u32 = 2;
/// Longest delivery estimate, in days.
pub const MAX_DELIVERY_DAYS: u32 = 5;

/// Whole-unit, currency-agnostic parcel price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Wrap an already rounded amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Amount in whole units.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(Self::amount).fold(0, u64::saturating_add))
    }
}

/// Price a parcel: `round(100 + 10·weight + 0.001·length·width·height)`.
///
/// # Examples
/// ```
/// use evo_backend::domain::{Dimensions, calculate_price};
///
/// let dims = Dimensions { length: 20.0, width: 15.0, height: 10.0 };
/// assert_eq!(calculate_price(1.5, &dims).amount(), 115);
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "validated drafts keep the rounded total positive and far below u64::MAX"
)]
pub fn calculate_price(weight: f64, dimensions: &Dimensions) -> Price {
    let total = BASE_PRICE + weight * PRICE_PER_KG + dimensions.volume() * PRICE_PER_CUBIC_CM;
    Price(total.round().max(0.0) as u64)
}

/// Delivery estimate `offset_days` whole days after `now`.
///
/// Offsets outside `MIN_DELIVERY_DAYS..=MAX_DELIVERY_DAYS` are clamped.
#[must_use]
pub fn estimate_delivery(now: DateTime<Utc>, offset_days: u32) -> DateTime<Utc> {
    let days = offset_days.clamp(MIN_DELIVERY_DAYS, MAX_DELIVERY_DAYS);
    now + Duration::days(i64::from(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn dims(length: f64, width: f64, height: f64) -> Dimensions {
        Dimensions {
            length,
            width,
            height,
        }
    }

    #[rstest]
    #[case(1.5, dims(20.0, 15.0, 10.0), 115)]
    #[case(0.1, dims(1.0, 1.0, 1.0), 101)]
    #[case(10.0, dims(50.0, 40.0, 25.0), 250)]
    #[case(2.0, dims(10.0, 10.0, 10.0), 121)]
    fn price_is_rounded_weight_and_volume(
        #[case] weight: f64,
        #[case] dimensions: Dimensions,
        #[case] expected: u64,
    ) {
        assert_eq!(calculate_price(weight, &dimensions), Price::new(expected));
    }

    #[rstest]
    #[case(0, 2)]
    #[case(2, 2)]
    #[case(4, 4)]
    #[case(5, 5)]
    #[case(9, 5)]
    fn delivery_offset_is_clamped(#[case] offset: u32, #[case] expected_days: i64) {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(
            estimate_delivery(now, offset) - now,
            Duration::days(expected_days)
        );
    }

    #[rstest]
    fn prices_sum_saturating() {
        let total: Price = [Price::new(115), Price::new(250)].into_iter().sum();
        assert_eq!(total.amount(), 365);
    }
}
