//! Time source used to stamp incoming samples.
//!
//! Each sample is stamped once on receipt; the same [`Stamp`] feeds the chart
//! label of every panel and the receipt time of the recorder entry.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

/// Receipt time of one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// Milliseconds since the Unix epoch.
    pub epoch_millis: i64,
    /// Wall-clock label shown on the chart axis.
    pub label: String,
}

pub trait Clock {
    fn now(&self) -> Stamp;
}

/// Local wall-clock time, labelled `HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Stamp {
        let now = Local::now();
        Stamp {
            epoch_millis: now.timestamp_millis(),
            label: now.format("%H:%M:%S").to_string(),
        }
    }
}

/// Externally driven clock for replays and tests. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(epoch_millis: i64) -> Self {
        Self { millis: Arc::new(AtomicI64::new(epoch_millis)) }
    }

    pub fn set(&self, epoch_millis: i64) {
        self.millis.store(epoch_millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Stamp {
        let epoch_millis = self.millis.load(Ordering::SeqCst);
        // UTC keeps labels independent of the host timezone.
        let label = DateTime::<Utc>::from_timestamp_millis(epoch_millis)
            .map(|t| t.format("%H:%M:%S%.3f").to_string())
            .unwrap_or_else(|| epoch_millis.to_string());
        Stamp { epoch_millis, label }
    }
}
