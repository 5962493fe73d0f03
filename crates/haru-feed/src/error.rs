//! Error types for the feed service.

use thiserror::Error;

/// Feed failures.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    /// "My errands" mode without an authenticated caller (401-class).
    #[error("로그인이 필요합니다")]
    Unauthenticated,

    /// The errand store or profile store failed (500-class).
    #[error("심부름 목록을 불러올 수 없습니다: {0}")]
    Backend(String),
}
