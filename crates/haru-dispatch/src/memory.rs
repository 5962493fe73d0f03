//! In-memory port implementations.
//!
//! Used by tests and local development; the production deployment wires the
//! ports to the hosted database instead.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use haru_core::{
    Errand, ErrandStop, HelperProfile, ProfileStore, RequesterProfile, StoreError,
    SubscriptionStatus,
};

use crate::notify::Notification;
use crate::ports::{ErrandStore, HelperDirectory, NotificationSink};

/// In-memory profile store keyed by auth user id.
///
/// Enforces per-user uniqueness the way the production store's unique
/// constraint does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, RequesterProfile>>>,
}

impl InMemoryProfileStore {
    /// Seed a profile directly.
    pub fn seed(&self, profile: RequesterProfile) {
        self.profiles
            .write()
            .insert(profile.user_id.clone(), profile);
    }
}

impl ProfileStore for InMemoryProfileStore {
    async fn find_by_user(&self, user_id: &str) -> Result<RequesterProfile, StoreError> {
        self.profiles
            .read()
            .get(user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, profile: RequesterProfile) -> Result<RequesterProfile, StoreError> {
        let mut profiles = self.profiles.write();
        if profiles.contains_key(&profile.user_id) {
            return Err(StoreError::Backend(format!(
                "profile already exists for user {}",
                profile.user_id
            )));
        }
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}

/// In-memory errand and stop store, newest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryErrandStore {
    errands: Arc<RwLock<Vec<Errand>>>,
    stops: Arc<RwLock<Vec<ErrandStop>>>,
}

impl InMemoryErrandStore {
    /// All errands, newest created first.
    #[must_use]
    pub fn all(&self) -> Vec<Errand> {
        self.errands.read().clone()
    }

    /// All stops for an errand, in stop order.
    #[must_use]
    pub fn stops_for(&self, errand_id: &str) -> Vec<ErrandStop> {
        let mut stops: Vec<ErrandStop> = self
            .stops
            .read()
            .iter()
            .filter(|s| s.errand_id == errand_id)
            .cloned()
            .collect();
        stops.sort_by_key(|s| s.stop_order);
        stops
    }
}

impl ErrandStore for InMemoryErrandStore {
    async fn insert(&self, errand: Errand) -> Result<Errand, StoreError> {
        self.errands.write().insert(0, errand.clone());
        Ok(errand)
    }

    async fn insert_stops(&self, stops: Vec<ErrandStop>) -> Result<(), StoreError> {
        self.stops.write().extend(stops);
        Ok(())
    }
}

/// In-memory helper directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHelperDirectory {
    helpers: Arc<RwLock<Vec<HelperProfile>>>,
}

impl InMemoryHelperDirectory {
    /// Add a helper with the given subscription status and online flag.
    pub fn add(&self, id: &str, subscription_status: SubscriptionStatus, is_active: bool) {
        self.helpers.write().push(HelperProfile {
            id: id.to_string(),
            user_id: Uuid::new_v4().to_string(),
            subscription_status,
            is_active,
            current_lat: None,
            current_lng: None,
            last_location_at: None,
        });
    }

    /// Set a helper's last reported position.
    pub fn set_position(&self, id: &str, lat: f64, lng: f64, at: DateTime<Utc>) {
        if let Some(helper) = self.helpers.write().iter_mut().find(|h| h.id == id) {
            helper.current_lat = Some(lat);
            helper.current_lng = Some(lng);
            helper.last_location_at = Some(at);
        }
    }
}

impl HelperDirectory for InMemoryHelperDirectory {
    async fn by_subscription(
        &self,
        statuses: &[SubscriptionStatus],
    ) -> Result<Vec<HelperProfile>, StoreError> {
        Ok(self
            .helpers
            .read()
            .iter()
            .filter(|h| statuses.contains(&h.subscription_status))
            .cloned()
            .collect())
    }
}

/// In-memory notification sink.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationSink {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationSink {
    /// All inserted notifications, in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    async fn insert_batch(&self, notifications: Vec<Notification>) -> Result<(), StoreError> {
        self.notifications.write().extend(notifications);
        Ok(())
    }
}
