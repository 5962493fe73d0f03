//! Fare constants, in KRW won.

/// Delivery base fare.
pub const BASE_PRICE: u32 = 3_000;
/// Fare per kilometer.
pub const PRICE_PER_KM: u32 = 1_200;
/// Minimum pre-surcharge fare.
pub const MIN_PRICE: u32 = 3_000;

/// Rain surcharge multiplier (+20%).
pub const WEATHER_RAIN_MULTIPLIER: f64 = 1.2;
/// Snow surcharge multiplier (+40%).
pub const WEATHER_SNOW_MULTIPLIER: f64 = 1.4;
/// Extreme-weather surcharge multiplier (+50%).
pub const WEATHER_EXTREME_MULTIPLIER: f64 = 1.5;

/// Late-night surcharge (22:00–06:00).
pub const TIME_LATE_NIGHT_SURCHARGE: u32 = 5_000;
/// Rush-hour surcharge (07–09, 18–20).
pub const TIME_RUSH_HOUR_SURCHARGE: u32 = 2_000;

/// Medium-weight surcharge.
pub const WEIGHT_MEDIUM_SURCHARGE: u32 = 2_000;
/// Heavy-weight surcharge.
pub const WEIGHT_HEAVY_SURCHARGE: u32 = 10_000;

/// Fee per drop-off beyond the first.
pub const STOP_FEE: u32 = 1_500;

/// Shopping errand base fare.
pub const SHOPPING_BASE_PRICE: u32 = 5_000;
/// Range fee, local tier (≈1 km).
pub const SHOPPING_RANGE_LOCAL: u32 = 0;
/// Range fee, district tier (≈3 km).
pub const SHOPPING_RANGE_DISTRICT: u32 = 3_000;
/// Range fee, city tier (≈10 km).
pub const SHOPPING_RANGE_CITY: u32 = 8_000;
/// Fee per item past the free allowance.
pub const SHOPPING_ITEM_PRICE: u32 = 500;
/// Items included in the base fare.
pub const SHOPPING_FREE_ITEMS: u32 = 2;
