//! Notification fan-out.
//!
//! Errand creation submits a task to a bounded queue and moves on; a
//! background worker drains the queue and notifies subscribed helpers. The
//! contract is explicit: fan-out never blocks the creating request and its
//! failures are never visible to it — recipient-lookup failure aborts the
//! whole fan-out, insert failure is logged, and a full queue drops the task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use haru_core::{Errand, StoreError, SubscriptionStatus};

use crate::clock::Clock;
use crate::config::DispatchConfig;
use crate::ports::{HelperDirectory, NotificationSink};

/// A notification record for one helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: String,
    /// Recipient helper profile id.
    pub recipient_id: String,
    /// Short Korean headline.
    pub title: String,
    /// Human-readable summary: category label, errand title, formatted price.
    pub body: String,
    /// The errand this notification is about.
    pub errand_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A unit of fan-out work.
#[derive(Debug, Clone)]
pub struct FanoutTask {
    /// The freshly created errand to announce.
    pub errand: Errand,
}

/// Submission side of the fan-out queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FanoutHandle {
    tx: mpsc::Sender<FanoutTask>,
}

impl FanoutHandle {
    /// Submit an errand for fan-out. Never blocks: a full or closed queue is
    /// logged and the task dropped.
    pub fn submit(&self, errand: Errand) {
        let errand_id = errand.id.clone();
        match self.tx.try_send(FanoutTask { errand }) {
            Ok(()) => debug!(errand_id = %errand_id, "fan-out task queued"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(errand_id = %errand_id, "fan-out queue full, dropping task");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(errand_id = %errand_id, "fan-out worker gone, dropping task");
            }
        }
    }
}

/// Background worker notifying subscribed helpers of new errands.
pub struct FanoutWorker<H, N, C> {
    rx: mpsc::Receiver<FanoutTask>,
    helpers: H,
    sink: N,
    clock: C,
    recipient_cap: usize,
}

impl<H, N, C> FanoutWorker<H, N, C>
where
    H: HelperDirectory,
    N: NotificationSink,
    C: Clock,
{
    /// Create a worker and its submission handle.
    #[must_use]
    pub fn new(helpers: H, sink: N, clock: C, config: &DispatchConfig) -> (FanoutHandle, Self) {
        let (tx, rx) = mpsc::channel(config.queue_depth.max(1));
        let worker = Self {
            rx,
            helpers,
            sink,
            clock,
            recipient_cap: config.recipient_cap,
        };
        (FanoutHandle { tx }, worker)
    }

    /// Drain the queue until every submission handle is dropped.
    pub async fn run(mut self) {
        while let Some(task) = self.rx.recv().await {
            self.process(&task.errand).await;
        }
        debug!("fan-out worker stopped");
    }

    async fn process(&self, errand: &Errand) {
        let helpers = match self
            .helpers
            .by_subscription(&[SubscriptionStatus::Active, SubscriptionStatus::Trial])
            .await
        {
            Ok(helpers) => helpers,
            Err(e) => {
                // Recipient lookup failure aborts the whole fan-out.
                warn!(errand_id = %errand.id, error = %e, "helper lookup failed, skipping fan-out");
                return;
            }
        };

        let notifications: Vec<Notification> = helpers
            .iter()
            .take(self.recipient_cap)
            .map(|helper| self.notification_for(errand, &helper.id))
            .collect();
        if notifications.is_empty() {
            debug!(errand_id = %errand.id, "no subscribed helpers to notify");
            return;
        }

        let count = notifications.len();
        match self.sink.insert_batch(notifications).await {
            Ok(()) => info!(errand_id = %errand.id, recipients = count, "fan-out delivered"),
            Err(e) => self.log_insert_failure(&errand.id, &e),
        }
    }

    fn notification_for(&self, errand: &Errand, recipient_id: &str) -> Notification {
        Notification {
            id: Uuid::new_v4().to_string(),
            recipient_id: recipient_id.to_string(),
            title: "새 심부름이 등록되었습니다".to_string(),
            body: format!(
                "[{}] {} - {}원",
                errand.category.label(),
                errand.title,
                format_won(errand.total_price)
            ),
            errand_id: errand.id.clone(),
            created_at: self.clock.now(),
        }
    }

    fn log_insert_failure(&self, errand_id: &str, e: &StoreError) {
        warn!(errand_id = %errand_id, error = %e, "notification insert failed");
    }
}

/// Format a won amount with thousands separators, e.g. `9000` → `"9,000"`.
#[must_use]
pub fn format_won(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
