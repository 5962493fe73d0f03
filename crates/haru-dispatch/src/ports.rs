//! Collaborator ports for the intake service and fan-out worker.
//!
//! All calls are synchronous I/O from the perspective of the step that issues
//! them; nothing here retries. The profile store port is shared with the feed
//! service and lives in `haru-core`.

use haru_core::{Errand, ErrandStop, HelperProfile, StoreError, SubscriptionStatus};

use crate::notify::Notification;

/// Errand and stop persistence port.
pub trait ErrandStore: Send + Sync {
    /// Insert a new errand.
    fn insert(
        &self,
        errand: Errand,
    ) -> impl std::future::Future<Output = Result<Errand, StoreError>> + Send;

    /// Insert the extra stops of a multi-stop delivery. Issued after the
    /// errand insert, outside any shared transaction: a failure here leaves
    /// the errand standing.
    fn insert_stops(
        &self,
        stops: Vec<ErrandStop>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Helper directory port, used by fan-out to find notification recipients.
pub trait HelperDirectory: Send + Sync {
    /// All helpers whose subscription status is one of `statuses`, without
    /// regard to their currently-online flag.
    fn by_subscription(
        &self,
        statuses: &[SubscriptionStatus],
    ) -> impl std::future::Future<Output = Result<Vec<HelperProfile>, StoreError>> + Send;
}

/// Notification insert sink.
///
/// Writes on behalf of many recipients at once, so the backing implementation
/// runs with service-role credentials that bypass row-level authorization.
pub trait NotificationSink: Send + Sync {
    /// Insert one notification record per recipient.
    fn insert_batch(
        &self,
        notifications: Vec<Notification>,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
