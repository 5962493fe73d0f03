//! # haru-feed
//!
//! Errand feed: a filtered, paginated, optionally geo-sorted listing for
//! requesters ("my errands") and helpers ("available errands near me").
//!
//! The feed is strictly read-only over the errand store. When a helper
//! position is supplied, every entry is annotated with the live straight-line
//! distance from that position to the errand's pickup point; entries without
//! pickup coordinates keep a null distance and are never excluded by a
//! distance bound.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod feed;
pub mod memory;
pub mod ports;

pub use error::FeedError;
pub use feed::{FeedErrand, FeedMode, FeedPage, FeedQuery, FeedService, FeedSort};
pub use memory::{InMemoryApplicationCounter, InMemoryErrandDirectory};
pub use ports::{ApplicationCounter, ErrandDirectory, ErrandPage, ListFilter};
