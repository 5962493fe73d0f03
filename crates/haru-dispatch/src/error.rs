//! Error types for errand intake.
//!
//! Only failures that prevent the requester from getting a usable errand
//! record appear here. Stop persistence and notification fan-out degrade
//! gracefully: logged, never surfaced.

use haru_core::StoreError;
use thiserror::Error;

/// Fatal intake failures, in checking order.
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    /// No valid session (401-class).
    #[error("로그인이 필요합니다")]
    Unauthenticated,

    /// Request validation failed (400-class). Carries the first-violated
    /// field's Korean message.
    #[error("{0}")]
    Validation(String),

    /// Requester profile lookup failed with something other than not-found
    /// (500-class). Not retried.
    #[error("프로필 조회에 실패했습니다: {0}")]
    ProfileResolution(String),

    /// Errand persistence failed (500-class). `message` is the raw cause;
    /// redaction to a generic message is the API layer's job.
    #[error("심부름 등록에 실패했습니다: {message}")]
    Persistence {
        /// Raw backend cause.
        message: String,
        /// Stable machine code for support triage.
        code: String,
        /// Human hint for support triage.
        hint: String,
    },
}

impl IntakeError {
    /// Wrap a store failure from the errand insert step.
    #[must_use]
    pub fn persistence(source: &StoreError) -> Self {
        Self::Persistence {
            message: source.to_string(),
            code: "ERRAND_INSERT_FAILED".to_string(),
            hint: "심부름 저장소 상태를 확인하세요".to_string(),
        }
    }
}
