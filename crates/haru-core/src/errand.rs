//! Errand entity and its category, status, and pricing-condition enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrandCategory {
    /// Door-to-door delivery (carrying, queueing, documents all included).
    Delivery,
    /// Shopping on the requester's behalf.
    Shopping,
}

impl ErrandCategory {
    /// Korean display label, as shown in notifications and the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivery => "배달",
            Self::Shopping => "구매대행",
        }
    }
}

/// Errand lifecycle status.
///
/// Created at `Open`; assignment and progress transitions are owned by the
/// matching workflow, not by this engine. The feed never mutates status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrandStatus {
    /// Accepting helper applications.
    Open,
    /// A helper has been matched.
    Matched,
    /// The matched helper is underway.
    InProgress,
    /// Finished and settled.
    Completed,
    /// Cancelled by either party.
    Cancelled,
}

impl ErrandStatus {
    /// Korean display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "모집중",
            Self::Matched => "매칭완료",
            Self::InProgress => "진행중",
            Self::Completed => "완료",
            Self::Cancelled => "취소됨",
        }
    }
}

/// Status of a helper's application against an open errand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted, awaiting the requester's decision.
    Pending,
    /// Accepted by the requester.
    Accepted,
    /// Rejected by the requester.
    Rejected,
    /// Withdrawn by the helper.
    Withdrawn,
}

/// Weather condition used for pricing surcharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherCondition {
    /// No surcharge.
    Clear,
    /// Rain, 20% surcharge.
    Rain,
    /// Snow, 40% surcharge.
    Snow,
    /// Extreme weather, 50% surcharge.
    Extreme,
}

/// Time-of-day condition used for pricing surcharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeCondition {
    /// Regular daytime hours.
    Day,
    /// 22:00–05:59.
    LateNight,
    /// 07:00–08:59 and 18:00–19:59.
    RushHour,
}

impl TimeCondition {
    /// Derive the condition from an hour of day (0–23).
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            22..=23 | 0..=5 => Self::LateNight,
            7..=8 | 18..=19 => Self::RushHour,
            _ => Self::Day,
        }
    }
}

/// Weight class of the delivered goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightClass {
    /// Hand-carryable, no surcharge.
    Light,
    /// Medium, +2,000 won.
    Medium,
    /// Heavy, +10,000 won.
    Heavy,
}

/// Shopping errand range tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShoppingRange {
    /// Within about 1 km, no range fee.
    Local,
    /// Within about 3 km.
    District,
    /// Within about 10 km.
    City,
    /// A specific pinned location; priced by raw distance instead.
    Specific,
}

impl ShoppingRange {
    /// Korean display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Local => "동네 (1km 이내)",
            Self::District => "우리동네 (3km 이내)",
            Self::City => "넓은 범위 (10km 이내)",
            Self::Specific => "특정 장소 지정",
        }
    }
}

/// A single item on a shopping errand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Item name, free text.
    pub name: String,
    /// Requested quantity.
    pub quantity: u32,
    /// Optional free-text note ("무거운 가구", brand, size, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// An extra drop-off on a multi-stop delivery.
///
/// Stop 1 is implicit: the errand's own delivery address. Persisted stops
/// therefore start at `stop_order == 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrandStop {
    /// Errand this stop belongs to.
    pub errand_id: String,
    /// Position in the route, `>= 2`.
    pub stop_order: u32,
    /// Drop-off address.
    pub address: String,
    /// Unit/floor/building detail.
    pub address_detail: Option<String>,
    /// Latitude, when geocoded.
    pub lat: Option<f64>,
    /// Longitude, when geocoded.
    pub lng: Option<f64>,
    /// Recipient name at this stop.
    pub recipient_name: Option<String>,
    /// Recipient phone at this stop.
    pub recipient_phone: Option<String>,
}

/// A requester-submitted delivery or shopping task.
///
/// Price fields are KRW minor units (won). Unused variant fields are always
/// exactly 0 so persistence has a uniform shape across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Errand {
    /// Unique identifier.
    pub id: String,
    /// Requester profile id (never a raw user/session id).
    pub requester_id: String,
    /// Matched helper profile id, once assigned.
    pub helper_id: Option<String>,
    /// Title, shown in the feed and notifications.
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Category, fixed at creation.
    pub category: ErrandCategory,
    /// Pickup address.
    pub pickup_address: String,
    /// Pickup unit/floor/building detail.
    pub pickup_detail: Option<String>,
    /// Pickup latitude.
    pub pickup_lat: Option<f64>,
    /// Pickup longitude.
    pub pickup_lng: Option<f64>,
    /// Delivery address.
    pub delivery_address: String,
    /// Delivery unit/floor/building detail.
    pub delivery_detail: Option<String>,
    /// Delivery latitude.
    pub delivery_lat: Option<f64>,
    /// Delivery longitude.
    pub delivery_lng: Option<f64>,
    /// Straight-line pickup-to-delivery distance in km, when both coordinate
    /// pairs were supplied.
    pub estimated_distance: Option<f64>,
    /// Base fare component.
    pub base_price: u32,
    /// Distance fare component.
    pub distance_price: u32,
    /// Multi-stop fee, 0 unless a multi-stop delivery.
    pub stop_fee: u32,
    /// Shopping range fee, 0 unless a shopping errand.
    pub range_fee: u32,
    /// Shopping item fee, 0 unless a shopping errand.
    pub item_fee: u32,
    /// Requester tip.
    pub tip: u32,
    /// Post-reconciliation total, tip included.
    pub total_price: u32,
    /// Lifecycle status.
    pub status: ErrandStatus,
    /// Whether this delivery has extra stops.
    pub is_multi_stop: bool,
    /// Total stop count including the primary delivery address.
    pub total_stops: u32,
    /// Shopping range tier, shopping errands only.
    pub shopping_range: Option<ShoppingRange>,
    /// Shopping item list, shopping errands only.
    pub shopping_items: Option<Vec<ShoppingItem>>,
    /// Requested future start time, if scheduled.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Errand {
    /// Pickup coordinates, when both were supplied.
    #[must_use]
    pub fn pickup_coords(&self) -> Option<(f64, f64)> {
        match (self.pickup_lat, self.pickup_lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Delivery coordinates, when both were supplied.
    #[must_use]
    pub fn delivery_coords(&self) -> Option<(f64, f64)> {
        match (self.delivery_lat, self.delivery_lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }
}
