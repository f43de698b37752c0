use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub stage_runs: usize,
    pub cells: usize,
    pub errors: usize,
    pub domain_errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_stage(&self, cells: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.stage_runs += 1;
            metrics.cells += cells;
        }
    }

    pub fn record_error(&self, domain: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
            if domain {
                metrics.domain_errors += 1;
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
