//! Delivery status set and its presentation projections.
//!
//! The progression order only drives progress bars and the timeline. Status
//! writes are not checked against it: any status may follow any other.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Parcel;

/// Lifecycle status of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Awaiting admin approval.
    Pending,
    /// Approved for delivery.
    Accepted,
    /// Collected from the sender.
    PickedUp,
    /// Moving between hubs.
    InTransit,
    /// With the courier on the final leg.
    OutForDelivery,
    /// Handed to the recipient.
    Delivered,
    /// Delivery attempt failed.
    Failed,
    /// Refused by an admin.
    Rejected,
}

/// Statuses rendered on the progress bar, in display order.
pub const PROGRESSION: [DeliveryStatus; 6] = [
    DeliveryStatus::Pending,
    DeliveryStatus::Accepted,
    DeliveryStatus::PickedUp,
    DeliveryStatus::InTransit,
    DeliveryStatus::OutForDelivery,
    DeliveryStatus::Delivered,
];

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown delivery status: {0}")]
pub struct UnknownStatus(pub String);

impl DeliveryStatus {
    /// All statuses, progression first.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Accepted,
        Self::PickedUp,
        Self::InTransit,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Failed,
        Self::Rejected,
    ];

    /// Wire name, e.g. `out_for_delivery`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::PickedUp => "picked_up",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Rejected => "rejected",
        }
    }

    /// Title-cased label, e.g. `Out For Delivery`.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::DeliveryStatus;
    ///
    /// assert_eq!(DeliveryStatus::PickedUp.label(), "Picked Up");
    /// ```
    #[must_use]
    pub fn label(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect::<String>()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Position on the progress bar; `None` for `failed` and `rejected`.
    #[must_use]
    pub fn progression_index(self) -> Option<usize> {
        PROGRESSION.iter().position(|candidate| *candidate == self)
    }

    /// Progress percentage in `0..=100`.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::DeliveryStatus;
    ///
    /// assert_eq!(DeliveryStatus::Pending.progress(), 0);
    /// assert_eq!(DeliveryStatus::InTransit.progress(), 60);
    /// assert_eq!(DeliveryStatus::Delivered.progress(), 100);
    /// assert_eq!(DeliveryStatus::Rejected.progress(), 0);
    /// ```
    #[must_use]
    pub fn progress(self) -> u8 {
        let Some(index) = self.progression_index() else {
            return 0;
        };
        let last = PROGRESSION.len() - 1;
        // index <= last, so the rounded quotient is at most 100.
        u8::try_from((index * 100 + last / 2) / last).unwrap_or(100)
    }

    /// Whether the status ends the lifecycle without a delivery.
    #[must_use]
    pub const fn is_terminal_negative(self) -> bool {
        matches!(self, Self::Failed | Self::Rejected)
    }

    /// Whether the parcel is moving (accepted up to out for delivery).
    #[must_use]
    pub const fn is_in_transit(self) -> bool {
        matches!(
            self,
            Self::Accepted | Self::PickedUp | Self::InTransit | Self::OutForDelivery
        )
    }

    fn reached(self, stage: Self) -> bool {
        match (self.progression_index(), stage.progression_index()) {
            (Some(current), Some(target)) => current >= target,
            _ => false,
        }
    }
}

/// Progress percentage for a raw status string; unknown strings yield 0.
///
/// # Examples
/// ```
/// use evo_backend::domain::parcel_progress;
///
/// assert_eq!(parcel_progress("delivered"), 100);
/// assert_eq!(parcel_progress("pending"), 0);
/// assert_eq!(parcel_progress("unknown"), 0);
/// ```
#[must_use]
pub fn parcel_progress(status: &str) -> u8 {
    status
        .parse::<DeliveryStatus>()
        .map_or(0, DeliveryStatus::progress)
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

/// How a timeline entry is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimelineState {
    /// Checkmark.
    Completed,
    /// Terminal negative marker.
    Negative,
    /// Greyed-out future step.
    Upcoming,
}

/// One row of the parcel timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Row heading.
    pub title: String,
    /// Rendering state.
    pub state: TimelineState,
    /// Timestamp shown under the heading; `None` renders as "Not scheduled".
    pub at: Option<DateTime<Utc>>,
}

impl TimelineEntry {
    fn new(title: &str, state: TimelineState, at: Option<DateTime<Utc>>) -> Self {
        Self {
            title: title.to_owned(),
            state,
            at,
        }
    }
}

/// Project a parcel onto its timeline rows.
///
/// Rows after "Order Created" are timestamped with `updatedAt` since the
/// record keeps no per-status history.
#[must_use]
pub fn timeline(parcel: &Parcel) -> Vec<TimelineEntry> {
    use DeliveryStatus as S;
    use TimelineState::{Completed, Negative, Upcoming};

    let status = parcel.status();
    let updated = Some(parcel.updated_at());
    let mut rows = vec![TimelineEntry::new(
        "Order Created",
        Completed,
        Some(parcel.created_at()),
    )];

    match status {
        S::Pending => {}
        S::Rejected => rows.push(TimelineEntry::new("Order Rejected", Negative, updated)),
        _ => rows.push(TimelineEntry::new("Order Accepted", Completed, updated)),
    }

    for (stage, title) in [
        (S::PickedUp, "Picked Up"),
        (S::InTransit, "In Transit"),
        (S::OutForDelivery, "Out for Delivery"),
    ] {
        if status.reached(stage) {
            rows.push(TimelineEntry::new(title, Completed, updated));
        }
    }

    match status {
        S::Delivered => rows.push(TimelineEntry::new(
            "Delivered",
            Completed,
            parcel.delivered_at().or(updated),
        )),
        S::Failed => rows.push(TimelineEntry::new("Delivery Failed", Negative, updated)),
        _ => {}
    }

    if !matches!(status, S::Delivered | S::Rejected) {
        rows.push(TimelineEntry::new(
            "Estimated Delivery",
            Upcoming,
            parcel.estimated_delivery(),
        ));
    }

    rows
}
