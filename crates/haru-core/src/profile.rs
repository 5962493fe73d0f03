//! Requester and helper profile views.
//!
//! Profiles are owned by the external profile service; these are the
//! projections the engine reads and (for requesters) auto-provisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Helper subscription status.
///
/// Only `Active` and `Trial` helpers are eligible for job notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Paid subscription in force.
    Active,
    /// Free trial period.
    Trial,
    /// Subscription lapsed.
    Expired,
    /// Subscription cancelled by the helper.
    Cancelled,
}

impl SubscriptionStatus {
    /// Whether this status makes the helper eligible for job notifications.
    #[must_use]
    pub const fn is_notifiable(self) -> bool {
        matches!(self, Self::Active | Self::Trial)
    }
}

/// A requester profile.
///
/// Errands reference profiles by `id`, never by the raw auth user id; the
/// intake service get-or-creates one before inserting any errand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterProfile {
    /// Profile id.
    pub id: String,
    /// Auth user id this profile belongs to.
    pub user_id: String,
    /// Display name.
    pub name: String,
}

/// A helper (rider) profile, as seen by notification fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelperProfile {
    /// Profile id.
    pub id: String,
    /// Auth user id this profile belongs to.
    pub user_id: String,
    /// Subscription status; gates notification eligibility.
    pub subscription_status: SubscriptionStatus,
    /// Currently-online flag. Governs live-location tracking only, not
    /// notification eligibility.
    pub is_active: bool,
    /// Last reported latitude.
    pub current_lat: Option<f64>,
    /// Last reported longitude.
    pub current_lng: Option<f64>,
    /// When the position was last reported.
    pub last_location_at: Option<DateTime<Utc>>,
}
