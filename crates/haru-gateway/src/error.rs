//! API error envelope and environment-aware redaction.
//!
//! Production callers get a stable Korean message and nothing else; in
//! development the raw cause (and, for persistence failures, the triage code
//! and hint) ride along in a `debug` block.

use serde::Serialize;
use thiserror::Error;

use haru_dispatch::{Environment, IntakeError};
use haru_feed::FeedError;

/// Shown to production callers when errand creation fails server-side.
const CREATE_FAILED_MESSAGE: &str = "심부름 등록에 실패했습니다";

/// Shown to production callers for every other server-side failure.
const SERVER_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다";

/// Diagnostic detail attached to an error in development only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugInfo {
    /// Raw underlying cause.
    pub message: String,
    /// Stable machine code for support triage, when the source carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human triage hint, when the source carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// A failed API call: status code plus the caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{status}: {message}")]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Caller-facing message. Korean, stable, safe for production.
    pub message: String,
    /// Diagnostic detail; always `None` in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

impl ApiError {
    fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            debug: None,
        }
    }

    /// Map an intake failure to its wire form.
    #[must_use]
    pub fn from_intake(error: &IntakeError, environment: Environment) -> Self {
        match error {
            IntakeError::Unauthenticated => Self::new(401, error.to_string()),
            // Validation messages are written for the requester; pass through.
            IntakeError::Validation(message) => Self::new(400, message.clone()),
            IntakeError::ProfileResolution(cause) => {
                let mut api = Self::new(500, SERVER_ERROR_MESSAGE);
                if environment.exposes_causes() {
                    api.debug = Some(DebugInfo {
                        message: cause.clone(),
                        code: None,
                        hint: None,
                    });
                }
                api
            }
            IntakeError::Persistence {
                message,
                code,
                hint,
            } => {
                let mut api = Self::new(500, CREATE_FAILED_MESSAGE);
                if environment.exposes_causes() {
                    api.debug = Some(DebugInfo {
                        message: message.clone(),
                        code: Some(code.clone()),
                        hint: Some(hint.clone()),
                    });
                }
                api
            }
        }
    }

    /// Map a feed failure to its wire form.
    #[must_use]
    pub fn from_feed(error: &FeedError, environment: Environment) -> Self {
        match error {
            FeedError::Unauthenticated => Self::new(401, error.to_string()),
            FeedError::Backend(cause) => {
                let mut api = Self::new(500, SERVER_ERROR_MESSAGE);
                if environment.exposes_causes() {
                    api.debug = Some(DebugInfo {
                        message: cause.clone(),
                        code: None,
                        hint: None,
                    });
                }
                api
            }
        }
    }
}
