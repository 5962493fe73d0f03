//! # haru-dispatch
//!
//! Errand intake and notification fan-out.
//!
//! This crate provides:
//!
//! - [`IntakeService`]: validates a create-errand request, get-or-creates the
//!   requester profile, prices the errand, reconciles the client estimate,
//!   persists the errand and its extra stops, and submits notification
//!   fan-out
//! - [`FanoutWorker`]: a bounded background queue that notifies subscribed
//!   helpers without ever blocking or failing the creating request
//! - Ports for the errand store, helper directory, and notification sink,
//!   plus in-memory implementations
//! - [`Clock`] and [`Environment`] capabilities so time and environment
//!   branching are injected rather than read ambiently

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod error;
pub mod intake;
pub mod memory;
pub mod notify;
pub mod ports;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{DispatchConfig, Environment};
pub use error::IntakeError;
pub use intake::{CreateErrandRequest, IntakeService, Session, StopRequest};
pub use memory::{InMemoryErrandStore, InMemoryHelperDirectory, InMemoryNotificationSink,
    InMemoryProfileStore};
pub use notify::{FanoutHandle, FanoutWorker, Notification};
pub use ports::{ErrandStore, HelperDirectory, NotificationSink};
