//! Pricing input, tagged by fare variant.

use haru_core::{ShoppingItem, ShoppingRange, TimeCondition, WeatherCondition, WeightClass};
use serde::{Deserialize, Serialize};

/// Normalized pricing input.
///
/// The variant is chosen once at the entry point (category `SHOPPING` is
/// always `Shopping`; category `DELIVERY` is `DeliveryMultiStop` iff the
/// request is multi-stop with more than one stop, else `DeliverySingle`),
/// so the model's three computations are exhaustive match arms rather than
/// string-compared branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PricingInput {
    /// Single-stop delivery.
    DeliverySingle {
        /// Trip distance in kilometers.
        distance_km: f64,
        /// Weather condition.
        weather: WeatherCondition,
        /// Time-of-day condition.
        time_of_day: TimeCondition,
        /// Goods weight class.
        weight: WeightClass,
    },
    /// Delivery with extra drop-offs.
    DeliveryMultiStop {
        /// Trip distance in kilometers.
        distance_km: f64,
        /// Weather condition.
        weather: WeatherCondition,
        /// Time-of-day condition.
        time_of_day: TimeCondition,
        /// Goods weight class.
        weight: WeightClass,
        /// Total stop count including the primary address, `>= 2`.
        total_stops: u32,
    },
    /// Shopping errand.
    Shopping {
        /// Store-to-door distance in kilometers (only meaningful for the
        /// `Specific` range; 0 otherwise).
        distance_km: f64,
        /// Weather condition.
        weather: WeatherCondition,
        /// Time-of-day condition.
        time_of_day: TimeCondition,
        /// Range tier.
        range: ShoppingRange,
        /// Number of requested items.
        item_count: u32,
        /// Whether any item was flagged heavy (see [`has_heavy_item`]).
        has_heavy_item: bool,
    },
}

impl PricingInput {
    /// The distance component of this input, in kilometers.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        match self {
            Self::DeliverySingle { distance_km, .. }
            | Self::DeliveryMultiStop { distance_km, .. }
            | Self::Shopping { distance_km, .. } => *distance_km,
        }
    }
}

/// Heavy-item heuristic over a shopping errand's free-text items.
///
/// True iff any item's name or note contains the Korean token "무거" or the
/// English token "heavy" (case-insensitive). This is a known-weak signal
/// (typos and other phrasings are missed); replacing it with a structured
/// flag on the item is a product decision, so the substring behavior is kept
/// as-is.
#[must_use]
pub fn has_heavy_item(items: &[ShoppingItem]) -> bool {
    items.iter().any(|item| {
        let note = item.note.as_deref().unwrap_or("");
        text_flags_heavy(&item.name) || text_flags_heavy(note)
    })
}

fn text_flags_heavy(text: &str) -> bool {
    text.contains("무거") || text.to_lowercase().contains("heavy")
}
