//! # haru-gateway
//!
//! The HTTP-shaped edge of the errand engine: typed handlers that take a
//! session plus a request body, call the intake and feed services, and map
//! the outcome to a status code and a serializable envelope.
//!
//! There is no listener here. The handlers are transport-agnostic so any
//! HTTP framework (or a test harness) can mount them; the one concern this
//! crate owns besides status mapping is redaction, i.e. never leaking raw
//! backend causes to production callers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod handlers;

pub use error::{ApiError, DebugInfo};
pub use handlers::{handle_create_errand, handle_list_errands, ApiResponse, STATUS_CREATED, STATUS_OK};
