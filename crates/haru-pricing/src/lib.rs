//! # haru-pricing
//!
//! Pricing model for Haru errands.
//!
//! This crate provides:
//!
//! - A tagged [`PricingInput`] covering the three fare variants
//!   (single-stop delivery, multi-stop delivery, shopping errand)
//! - Pure fare computation into a [`PriceBreakdown`]
//! - Reconciliation of a client-declared estimate against the
//!   server-computed total
//! - The heavy-item free-text heuristic for shopping errands
//!
//! Every operation here is pure, total over well-formed input, and
//! deterministic. Malformed input (negative distance, zero stops) is the
//! caller's responsibility to prevent via request validation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod input;
pub mod model;
pub mod rates;
pub mod reconcile;

pub use input::{has_heavy_item, PricingInput};
pub use model::{compute, compute_delivery, compute_multi_stop, compute_shopping, PriceBreakdown};
pub use reconcile::{reconcile, within_tolerance};
