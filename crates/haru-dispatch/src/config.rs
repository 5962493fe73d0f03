//! Dispatch configuration.

use serde::{Deserialize, Serialize};

/// Deployment environment. Selects error redaction: production responses
/// never carry raw backend error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Redacted errors.
    Production,
    /// Raw causes included for debuggability.
    Development,
}

impl Environment {
    /// Whether raw error causes may appear in responses.
    #[must_use]
    pub const fn exposes_causes(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Configuration for the intake service and fan-out worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Maximum helpers notified per created errand.
    pub recipient_cap: usize,
    /// Bounded depth of the fan-out queue; submissions beyond it are dropped
    /// (logged), never blocked on.
    pub queue_depth: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            recipient_cap: 100,
            queue_depth: 64,
        }
    }
}

impl DispatchConfig {
    /// Production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the notification recipient cap.
    #[must_use]
    pub const fn with_recipient_cap(mut self, cap: usize) -> Self {
        self.recipient_cap = cap;
        self
    }

    /// Sets the fan-out queue depth.
    #[must_use]
    pub const fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth;
        self
    }
}
