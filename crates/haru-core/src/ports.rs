//! Shared collaborator ports.
//!
//! The profile store is consumed by both the dispatch and feed services, so
//! its trait and the port-level error live here. Service-specific ports
//! (errand store, helper directory, notification sink) live with their
//! service crates.

use thiserror::Error;

use crate::profile::RequesterProfile;

/// Error returned by external collaborator ports.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The requested record does not exist. Lookup-by-user returning this is
    /// the trigger for profile auto-provisioning; it is not fatal on its own.
    #[error("record not found")]
    NotFound,

    /// Any other backend failure. Fatal to the step that issued the call.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Profile store port: lookup by auth user id, and creation for the
/// get-or-create step.
pub trait ProfileStore: Send + Sync {
    /// Find the requester profile for an auth user id.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` when no profile exists for the user.
    fn find_by_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<RequesterProfile, StoreError>> + Send;

    /// Create a profile. The backing store is expected to enforce per-user
    /// uniqueness; the engine does not guard against concurrent auto-creates.
    fn create(
        &self,
        profile: RequesterProfile,
    ) -> impl std::future::Future<Output = Result<RequesterProfile, StoreError>> + Send;
}
