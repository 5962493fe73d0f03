//! Collaborator ports for the feed service.

use haru_core::{Errand, ErrandCategory, ErrandStatus, StoreError};

/// Store-level filter for an errand page. The store applies exact-match
/// filters, newest-created-first ordering, and pagination; geo annotation
/// and sorting happen above it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Restrict to one requester's errands.
    pub requester_id: Option<String>,
    /// Exact status match; `None` means all statuses.
    pub status: Option<ErrandStatus>,
    /// Exact category match.
    pub category: Option<ErrandCategory>,
    /// Page size.
    pub limit: u32,
    /// Page start.
    pub offset: u32,
}

/// A page of errands plus the exact pre-pagination total.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrandPage {
    /// Errands, newest created first.
    pub errands: Vec<Errand>,
    /// Total matches before pagination.
    pub total: u64,
}

/// Read-only errand listing port.
pub trait ErrandDirectory: Send + Sync {
    /// List errands matching the filter, newest first, with an exact total.
    fn list(
        &self,
        filter: &ListFilter,
    ) -> impl std::future::Future<Output = Result<ErrandPage, StoreError>> + Send;
}

/// Application-count port.
pub trait ApplicationCounter: Send + Sync {
    /// Number of pending (non-withdrawn, undecided) applications against an
    /// errand.
    fn pending_count(
        &self,
        errand_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;
}
