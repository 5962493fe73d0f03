//! # haru-core
//!
//! Shared domain model for the Haru errand marketplace engine.
//!
//! This crate provides:
//!
//! - The `Errand` entity, its stops, and shopping items
//! - Category, status, and pricing-condition enums with Korean display labels
//! - Requester and helper profile views
//! - The port-level store error and the profile store port shared by the
//!   dispatch and feed services

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod errand;
pub mod ports;
pub mod profile;

pub use errand::{
    ApplicationStatus, Errand, ErrandCategory, ErrandStatus, ErrandStop, ShoppingItem,
    ShoppingRange, TimeCondition, WeatherCondition, WeightClass,
};
pub use ports::{ProfileStore, StoreError};
pub use profile::{HelperProfile, RequesterProfile, SubscriptionStatus};
