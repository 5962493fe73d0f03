//! In-memory port implementations for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use haru_core::{Errand, StoreError};

use crate::ports::{ApplicationCounter, ErrandDirectory, ErrandPage, ListFilter};

/// In-memory errand directory, newest created first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryErrandDirectory {
    errands: Arc<RwLock<Vec<Errand>>>,
}

impl InMemoryErrandDirectory {
    /// Add an errand. The directory keeps newest-created-first order.
    pub fn push(&self, errand: Errand) {
        let mut errands = self.errands.write();
        errands.push(errand);
        errands.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

impl ErrandDirectory for InMemoryErrandDirectory {
    async fn list(&self, filter: &ListFilter) -> Result<ErrandPage, StoreError> {
        let errands = self.errands.read();
        let matches: Vec<Errand> = errands
            .iter()
            .filter(|e| {
                filter
                    .requester_id
                    .as_ref()
                    .is_none_or(|id| &e.requester_id == id)
            })
            .filter(|e| filter.status.is_none_or(|s| e.status == s))
            .filter(|e| filter.category.is_none_or(|c| e.category == c))
            .cloned()
            .collect();
        let total = matches.len() as u64;
        let page = matches
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect();
        Ok(ErrandPage {
            errands: page,
            total,
        })
    }
}

/// In-memory pending-application counter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApplicationCounter {
    counts: Arc<RwLock<HashMap<String, u64>>>,
}

impl InMemoryApplicationCounter {
    /// Set the pending-application count for an errand.
    pub fn set(&self, errand_id: &str, count: u64) {
        self.counts.write().insert(errand_id.to_string(), count);
    }
}

impl ApplicationCounter for InMemoryApplicationCounter {
    async fn pending_count(&self, errand_id: &str) -> Result<u64, StoreError> {
        Ok(self.counts.read().get(errand_id).copied().unwrap_or(0))
    }
}
