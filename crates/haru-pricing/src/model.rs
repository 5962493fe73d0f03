//! Fare computation.
//!
//! Components are computed in integer won so that
//! `total_price == base_price + distance_price + stop_fee + range_fee + item_fee`
//! holds exactly, with no rounding drift. Distance, stop count, and item
//! count come off the request body unbounded, so every component and the
//! total saturate at `u32::MAX` instead of wrapping. Unused variant fields
//! are always exactly 0, never absent, so persistence has a uniform shape.

use haru_core::{ShoppingRange, TimeCondition, WeatherCondition, WeightClass};
use serde::{Deserialize, Serialize};

use crate::input::PricingInput;
use crate::rates;

/// Itemized fare, in KRW won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Base fare: variant base with weather multiplier and flat surcharges.
    pub base_price: u32,
    /// Distance fare with weather multiplier.
    pub distance_price: u32,
    /// Multi-stop fee; 0 for single-stop delivery and shopping.
    pub stop_fee: u32,
    /// Shopping range fee; 0 for delivery.
    pub range_fee: u32,
    /// Shopping item fee; 0 for delivery.
    pub item_fee: u32,
    /// Sum of all components, saturating at `u32::MAX`.
    pub total_price: u32,
}

impl PriceBreakdown {
    fn finish(base: u32, distance: u32, stop: u32, range: u32, item: u32) -> Self {
        Self {
            base_price: base,
            distance_price: distance,
            stop_fee: stop,
            range_fee: range,
            item_fee: item,
            total_price: base
                .saturating_add(distance)
                .saturating_add(stop)
                .saturating_add(range)
                .saturating_add(item),
        }
    }
}

/// Compute the fare for any variant.
#[must_use]
pub fn compute(input: &PricingInput) -> PriceBreakdown {
    match input {
        PricingInput::DeliverySingle { .. } => compute_delivery(input),
        PricingInput::DeliveryMultiStop { .. } => compute_multi_stop(input),
        PricingInput::Shopping { .. } => compute_shopping(input),
    }
}

/// Single-stop delivery fare. Multi-stop and shopping inputs price their
/// shared delivery components the same way and are accepted here with the
/// extra fees left at 0.
#[must_use]
pub fn compute_delivery(input: &PricingInput) -> PriceBreakdown {
    let (weather, time, weight) = delivery_conditions(input);
    let base = delivery_base(rates::BASE_PRICE, weather, time, weight);
    let distance = distance_price(input.distance_km(), weather);
    PriceBreakdown::finish(base, distance, 0, 0, 0)
}

/// Multi-stop delivery fare: the single-stop fare plus a per-extra-stop fee,
/// monotonically non-decreasing in the stop count.
#[must_use]
pub fn compute_multi_stop(input: &PricingInput) -> PriceBreakdown {
    let single = compute_delivery(input);
    let stop_fee = match input {
        PricingInput::DeliveryMultiStop { total_stops, .. } => {
            total_stops.saturating_sub(1).saturating_mul(rates::STOP_FEE)
        }
        _ => 0,
    };
    PriceBreakdown::finish(
        single.base_price,
        single.distance_price,
        stop_fee,
        0,
        0,
    )
}

/// Shopping errand fare: shopping base plus range and item fees. The weight
/// surcharge does not apply; a heavy item raises the item fee instead.
#[must_use]
pub fn compute_shopping(input: &PricingInput) -> PriceBreakdown {
    let PricingInput::Shopping {
        distance_km,
        weather,
        time_of_day,
        range,
        item_count,
        has_heavy_item,
    } = input
    else {
        return compute(input);
    };

    let base = delivery_base(
        rates::SHOPPING_BASE_PRICE,
        *weather,
        *time_of_day,
        WeightClass::Light,
    );
    let distance = distance_price(*distance_km, *weather);
    let range_fee = match range {
        ShoppingRange::Local => rates::SHOPPING_RANGE_LOCAL,
        ShoppingRange::District => rates::SHOPPING_RANGE_DISTRICT,
        ShoppingRange::City => rates::SHOPPING_RANGE_CITY,
        // Specific locations are priced by the actual distance instead.
        ShoppingRange::Specific => 0,
    };
    let mut item_fee = item_count
        .saturating_sub(rates::SHOPPING_FREE_ITEMS)
        .saturating_mul(rates::SHOPPING_ITEM_PRICE);
    if *has_heavy_item {
        item_fee = item_fee.saturating_add(rates::WEIGHT_HEAVY_SURCHARGE);
    }

    PriceBreakdown::finish(base, distance, 0, range_fee, item_fee)
}

fn delivery_conditions(input: &PricingInput) -> (WeatherCondition, TimeCondition, WeightClass) {
    match input {
        PricingInput::DeliverySingle {
            weather,
            time_of_day,
            weight,
            ..
        }
        | PricingInput::DeliveryMultiStop {
            weather,
            time_of_day,
            weight,
            ..
        } => (*weather, *time_of_day, *weight),
        PricingInput::Shopping {
            weather,
            time_of_day,
            ..
        } => (*weather, *time_of_day, WeightClass::Light),
    }
}

fn delivery_base(
    variant_base: u32,
    weather: WeatherCondition,
    time: TimeCondition,
    weight: WeightClass,
) -> u32 {
    let weathered = round_won(f64::from(variant_base) * weather_multiplier(weather));
    weathered
        .max(rates::MIN_PRICE)
        .saturating_add(time_surcharge(time))
        .saturating_add(weight_surcharge(weight))
}

fn distance_price(distance_km: f64, weather: WeatherCondition) -> u32 {
    round_won(distance_km.max(0.0) * f64::from(rates::PRICE_PER_KM) * weather_multiplier(weather))
}

fn weather_multiplier(weather: WeatherCondition) -> f64 {
    match weather {
        WeatherCondition::Clear => 1.0,
        WeatherCondition::Rain => rates::WEATHER_RAIN_MULTIPLIER,
        WeatherCondition::Snow => rates::WEATHER_SNOW_MULTIPLIER,
        WeatherCondition::Extreme => rates::WEATHER_EXTREME_MULTIPLIER,
    }
}

const fn time_surcharge(time: TimeCondition) -> u32 {
    match time {
        TimeCondition::Day => 0,
        TimeCondition::LateNight => rates::TIME_LATE_NIGHT_SURCHARGE,
        TimeCondition::RushHour => rates::TIME_RUSH_HOUR_SURCHARGE,
    }
}

const fn weight_surcharge(weight: WeightClass) -> u32 {
    match weight {
        WeightClass::Light => 0,
        WeightClass::Medium => rates::WEIGHT_MEDIUM_SURCHARGE,
        WeightClass::Heavy => rates::WEIGHT_HEAVY_SURCHARGE,
    }
}

fn round_won(amount: f64) -> u32 {
    amount.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn single(distance_km: f64) -> PricingInput {
        PricingInput::DeliverySingle {
            distance_km,
            weather: WeatherCondition::Clear,
            time_of_day: TimeCondition::Day,
            weight: WeightClass::Light,
        }
    }

    fn multi(distance_km: f64, total_stops: u32) -> PricingInput {
        PricingInput::DeliveryMultiStop {
            distance_km,
            weather: WeatherCondition::Clear,
            time_of_day: TimeCondition::Day,
            weight: WeightClass::Light,
            total_stops,
        }
    }

    fn shopping(range: ShoppingRange, item_count: u32, heavy: bool) -> PricingInput {
        PricingInput::Shopping {
            distance_km: 0.0,
            weather: WeatherCondition::Clear,
            time_of_day: TimeCondition::Day,
            range,
            item_count,
            has_heavy_item: heavy,
        }
    }

    #[test]
    fn clear_day_light_delivery() {
        let breakdown = compute(&single(3.2));
        assert_eq!(breakdown.base_price, 3_000);
        assert_eq!(breakdown.distance_price, 3_840);
        assert_eq!(breakdown.stop_fee, 0);
        assert_eq!(breakdown.range_fee, 0);
        assert_eq!(breakdown.item_fee, 0);
        assert_eq!(breakdown.total_price, 6_840);
    }

    #[test_case(WeatherCondition::Clear, 3_000, 6_000; "clear")]
    #[test_case(WeatherCondition::Rain, 3_600, 7_200; "rain")]
    #[test_case(WeatherCondition::Snow, 4_200, 8_400; "snow")]
    #[test_case(WeatherCondition::Extreme, 4_500, 9_000; "extreme")]
    fn weather_scales_base_and_distance(
        weather: WeatherCondition,
        expected_base: u32,
        expected_distance: u32,
    ) {
        let breakdown = compute(&PricingInput::DeliverySingle {
            distance_km: 5.0,
            weather,
            time_of_day: TimeCondition::Day,
            weight: WeightClass::Light,
        });
        assert_eq!(breakdown.base_price, expected_base);
        assert_eq!(breakdown.distance_price, expected_distance);
    }

    #[test_case(TimeCondition::Day, 0; "day")]
    #[test_case(TimeCondition::LateNight, 5_000; "late night")]
    #[test_case(TimeCondition::RushHour, 2_000; "rush hour")]
    fn time_surcharge_is_flat(time_of_day: TimeCondition, surcharge: u32) {
        let breakdown = compute(&PricingInput::DeliverySingle {
            distance_km: 1.0,
            weather: WeatherCondition::Clear,
            time_of_day,
            weight: WeightClass::Light,
        });
        assert_eq!(breakdown.base_price, 3_000 + surcharge);
    }

    #[test_case(WeightClass::Light, 0; "light")]
    #[test_case(WeightClass::Medium, 2_000; "medium")]
    #[test_case(WeightClass::Heavy, 10_000; "heavy")]
    fn weight_surcharge_is_flat(weight: WeightClass, surcharge: u32) {
        let breakdown = compute(&PricingInput::DeliverySingle {
            distance_km: 1.0,
            weather: WeatherCondition::Clear,
            time_of_day: TimeCondition::Day,
            weight,
        });
        assert_eq!(breakdown.base_price, 3_000 + surcharge);
    }

    #[test]
    fn multi_stop_adds_per_extra_stop() {
        let base = compute(&single(4.0));
        let three_stops = compute(&multi(4.0, 3));
        assert_eq!(three_stops.stop_fee, 3_000);
        assert_eq!(three_stops.base_price, base.base_price);
        assert_eq!(three_stops.distance_price, base.distance_price);
        assert_eq!(three_stops.total_price, base.total_price + 3_000);
    }

    #[test_case(ShoppingRange::Local, 0; "local")]
    #[test_case(ShoppingRange::District, 3_000; "district")]
    #[test_case(ShoppingRange::City, 8_000; "city")]
    #[test_case(ShoppingRange::Specific, 0; "specific")]
    fn shopping_range_fee(range: ShoppingRange, expected: u32) {
        let breakdown = compute(&shopping(range, 1, false));
        assert_eq!(breakdown.range_fee, expected);
        assert_eq!(breakdown.base_price, 5_000);
    }

    #[test_case(0, 0; "no items")]
    #[test_case(2, 0; "free allowance")]
    #[test_case(3, 500; "one past allowance")]
    #[test_case(7, 2_500; "five past allowance")]
    fn shopping_item_fee(item_count: u32, expected: u32) {
        let breakdown = compute(&shopping(ShoppingRange::Local, item_count, false));
        assert_eq!(breakdown.item_fee, expected);
    }

    #[test]
    fn heavy_item_never_lowers_item_fee() {
        for count in 0..6 {
            let plain = compute(&shopping(ShoppingRange::Local, count, false));
            let heavy = compute(&shopping(ShoppingRange::Local, count, true));
            assert_eq!(heavy.item_fee, plain.item_fee + 10_000);
        }
    }

    #[test]
    fn absurd_inputs_saturate_instead_of_wrapping() {
        let huge_distance = compute(&single(1.0e12));
        assert_eq!(huge_distance.distance_price, u32::MAX);
        assert_eq!(huge_distance.total_price, u32::MAX);

        let huge_stops = compute(&multi(1.0, u32::MAX));
        assert_eq!(huge_stops.stop_fee, u32::MAX);
        assert_eq!(huge_stops.total_price, u32::MAX);

        let huge_items = compute(&shopping(ShoppingRange::City, u32::MAX, true));
        assert_eq!(huge_items.item_fee, u32::MAX);
        assert_eq!(huge_items.total_price, u32::MAX);
    }

    #[test]
    fn delivery_fields_are_zero_for_shopping_variant_and_vice_versa() {
        let shopping = compute(&shopping(ShoppingRange::City, 4, true));
        assert_eq!(shopping.stop_fee, 0);

        let delivery = compute(&multi(2.0, 4));
        assert_eq!(delivery.range_fee, 0);
        assert_eq!(delivery.item_fee, 0);
    }

    fn arb_weather() -> impl Strategy<Value = WeatherCondition> {
        prop_oneof![
            Just(WeatherCondition::Clear),
            Just(WeatherCondition::Rain),
            Just(WeatherCondition::Snow),
            Just(WeatherCondition::Extreme),
        ]
    }

    fn arb_time() -> impl Strategy<Value = TimeCondition> {
        prop_oneof![
            Just(TimeCondition::Day),
            Just(TimeCondition::LateNight),
            Just(TimeCondition::RushHour),
        ]
    }

    fn arb_weight() -> impl Strategy<Value = WeightClass> {
        prop_oneof![
            Just(WeightClass::Light),
            Just(WeightClass::Medium),
            Just(WeightClass::Heavy),
        ]
    }

    proptest! {
        #[test]
        fn total_is_exact_component_sum(
            distance_km in 0.0f64..300.0,
            weather in arb_weather(),
            time_of_day in arb_time(),
            weight in arb_weight(),
            total_stops in 2u32..20,
        ) {
            let breakdown = compute(&PricingInput::DeliveryMultiStop {
                distance_km, weather, time_of_day, weight, total_stops,
            });
            prop_assert_eq!(
                breakdown.total_price,
                breakdown.base_price
                    + breakdown.distance_price
                    + breakdown.stop_fee
                    + breakdown.range_fee
                    + breakdown.item_fee
            );
        }

        #[test]
        fn stop_fee_is_monotonic_in_stops(
            distance_km in 0.0f64..300.0,
            weather in arb_weather(),
            time_of_day in arb_time(),
            weight in arb_weight(),
            total_stops in 2u32..20,
        ) {
            let fewer = compute(&PricingInput::DeliveryMultiStop {
                distance_km, weather, time_of_day, weight, total_stops,
            });
            let more = compute(&PricingInput::DeliveryMultiStop {
                distance_km, weather, time_of_day, weight,
                total_stops: total_stops + 1,
            });
            prop_assert!(more.stop_fee >= fewer.stop_fee);
            prop_assert!(more.total_price >= fewer.total_price);
        }
    }
}
