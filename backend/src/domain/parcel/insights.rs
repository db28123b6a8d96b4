//! Read-side projections over parcel lists: filters and dashboard figures.

use serde::Serialize;
use utoipa::ToSchema;

use super::{DeliveryStatus, Parcel, Price};

/// Parcels shown on the user dashboard.
const USER_RECENT_LIMIT: usize = 3;
/// Pending parcels shown on the admin dashboard.
const ADMIN_PENDING_LIMIT: usize = 5;

/// Status filter plus free-text search for parcel lists.
///
/// Search is case-insensitive over tracking number, recipient name,
/// recipient email and delivery city. A blank search matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParcelFilter {
    /// Only parcels in this status.
    pub status: Option<DeliveryStatus>,
    /// Needle for the text search.
    pub search: Option<String>,
}

impl ParcelFilter {
    /// Whether `parcel` passes both the status and the search filter.
    #[must_use]
    pub fn matches(&self, parcel: &Parcel) -> bool {
        if self.status.is_some_and(|status| status != parcel.status()) {
            return false;
        }
        let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();
        let details = parcel.details();
        [
            parcel.tracking_number().as_ref(),
            details.recipient_name.as_str(),
            details.recipient_email.as_str(),
            details.delivery_address.city.as_str(),
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    /// Keep the matching parcels, preserving order.
    #[must_use]
    pub fn apply(&self, parcels: Vec<Parcel>) -> Vec<Parcel> {
        parcels
            .into_iter()
            .filter(|parcel| self.matches(parcel))
            .collect()
    }
}

fn newest_first(mut parcels: Vec<Parcel>, limit: usize) -> Vec<Parcel> {
    parcels.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    parcels.truncate(limit);
    parcels
}

/// Figures shown to a signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    pub total: usize,
    pub in_transit: usize,
    pub delivered: usize,
    #[schema(value_type = u64)]
    pub total_spent: Price,
    /// Three newest parcels by creation time.
    pub recent: Vec<Parcel>,
}

impl UserDashboard {
    /// Summarise one user's parcels.
    #[must_use]
    pub fn from_parcels(parcels: Vec<Parcel>) -> Self {
        let in_transit = parcels
            .iter()
            .filter(|parcel| parcel.status().is_in_transit())
            .count();
        let delivered = parcels
            .iter()
            .filter(|parcel| parcel.status() == DeliveryStatus::Delivered)
            .count();
        let total_spent = parcels.iter().map(Parcel::price).sum();
        Self {
            total: parcels.len(),
            in_transit,
            delivered,
            total_spent,
            recent: newest_first(parcels, USER_RECENT_LIMIT),
        }
    }
}

/// Figures shown on the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total: usize,
    pub pending: usize,
    pub delivered: usize,
    /// Anything not pending, delivered or rejected.
    pub in_progress: usize,
    /// Up to five pending parcels, newest first.
    pub pending_approval: Vec<Parcel>,
}

impl AdminDashboard {
    /// Summarise every parcel in the store.
    #[must_use]
    pub fn from_parcels(parcels: Vec<Parcel>) -> Self {
        let count = |status: DeliveryStatus| {
            parcels
                .iter()
                .filter(|parcel| parcel.status() == status)
                .count()
        };
        let pending = count(DeliveryStatus::Pending);
        let delivered = count(DeliveryStatus::Delivered);
        let in_progress = parcels
            .iter()
            .filter(|parcel| {
                !matches!(
                    parcel.status(),
                    DeliveryStatus::Pending | DeliveryStatus::Delivered | DeliveryStatus::Rejected
                )
            })
            .count();
        let total = parcels.len();
        let queue = parcels
            .into_iter()
            .filter(|parcel| parcel.status() == DeliveryStatus::Pending)
            .collect();
        Self {
            total,
            pending,
            delivered,
            in_progress,
            pending_approval: newest_first(queue, ADMIN_PENDING_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::draft;
    use super::super::{ParcelId, TrackingNumber};
    use super::*;
    use crate::domain::UserId;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::rstest;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn parcel(index: u32, status: DeliveryStatus, city: &str) -> Parcel {
        let created = base() + Duration::hours(i64::from(index));
        let mut details = draft();
        details.delivery_address.city = city.to_owned();
        Parcel::open(
            ParcelId::from_suffix(&format!("p{index:06}")),
            UserId::new("user-456").expect("valid user id"),
            TrackingNumber::from_digits(index).expect("in range"),
            details,
            created + Duration::days(3),
            created,
        )
        .with_status(status, created)
    }

    fn mixed() -> Vec<Parcel> {
        use DeliveryStatus as S;
        vec![
            parcel(1, S::Pending, "Manila"),
            parcel(2, S::InTransit, "Makati"),
            parcel(3, S::Delivered, "Quezon City"),
            parcel(4, S::Rejected, "Manila"),
            parcel(5, S::Pending, "Cebu"),
            parcel(6, S::Failed, "Davao"),
        ]
    }

    #[rstest]
    #[case(ParcelFilter::default(), 6)]
    #[case(ParcelFilter { status: Some(DeliveryStatus::Pending), search: None }, 2)]
    #[case(ParcelFilter { status: None, search: Some("MANILA".into()) }, 2)]
    #[case(ParcelFilter { status: None, search: Some("evo0000003".into()) }, 1)]
    #[case(ParcelFilter { status: None, search: Some("maria@EXAMPLE".into()) }, 6)]
    #[case(ParcelFilter { status: Some(DeliveryStatus::Rejected), search: Some("cebu".into()) }, 0)]
    #[case(ParcelFilter { status: None, search: Some("   ".into()) }, 6)]
    fn filter_counts(#[case] filter: ParcelFilter, #[case] expected: usize) {
        assert_eq!(filter.apply(mixed()).len(), expected);
    }

    #[rstest]
    fn user_dashboard_counts_and_recent() {
        let dashboard = UserDashboard::from_parcels(mixed());
        assert_eq!(dashboard.total, 6);
        assert_eq!(dashboard.in_transit, 1);
        assert_eq!(dashboard.delivered, 1);
        assert_eq!(dashboard.total_spent, Price::new(115 * 6));
        let recent: Vec<_> = dashboard.recent.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(recent, ["parcel-p000006", "parcel-p000005", "parcel-p000004"]);
    }

    #[rstest]
    fn admin_dashboard_queue_is_pending_newest_first() {
        let dashboard = AdminDashboard::from_parcels(mixed());
        assert_eq!(dashboard.total, 6);
        assert_eq!(dashboard.pending, 2);
        assert_eq!(dashboard.delivered, 1);
        assert_eq!(dashboard.in_progress, 2);
        let queue: Vec<_> = dashboard
            .pending_approval
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(queue, ["parcel-p000005", "parcel-p000001"]);
    }

    #[rstest]
    fn empty_dashboards_are_zeroed() {
        let user = UserDashboard::from_parcels(Vec::new());
        assert_eq!(user.total_spent, Price::default());
        assert!(user.recent.is_empty());
        let admin = AdminDashboard::from_parcels(Vec::new());
        assert_eq!(admin.in_progress, 0);
        assert!(admin.pending_approval.is_empty());
    }
}
