//! Great-circle distance between coordinates (Haversine).
//!
//! Used both for the pre-creation distance estimate and for annotating feed
//! entries with live distance from a helper's current position. Pure and
//! deterministic: identical inputs yield bit-identical output.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates, in meters.
#[must_use]
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Great-circle distance between two coordinates, in kilometers.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    distance_meters(lat1, lng1, lat2, lng2) / 1000.0
}
