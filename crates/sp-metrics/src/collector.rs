use sp_core::{SimClock, SimConfig};
use sp_field::AnomalyField;
use sp_fleet::Fleet;
use tracing::trace;

use crate::MetricsSnapshot;

/// Rate-limited, append-only snapshot history.
#[derive(Clone, Debug)]
pub struct MetricsCollector {
    interval_ms:         u64,
    detection_threshold: f64,
    last_snapshot_ms:    u64,
    snapshots:           Vec<MetricsSnapshot>,
}

impl MetricsCollector {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            interval_ms:         config.snapshot_interval_ms,
            detection_threshold: config.detection_threshold,
            last_snapshot_ms:    0,
            snapshots:           Vec::new(),
        }
    }

    /// Record a snapshot if `time_ms − last ≥ interval`.  Returns the new
    /// snapshot when one was taken.
    pub fn maybe_snapshot(
        &mut self,
        time_ms: u64,
        field:   &AnomalyField,
        fleet:   &Fleet,
        clock:   &SimClock,
    ) -> Option<&MetricsSnapshot> {
        if time_ms.saturating_sub(self.last_snapshot_ms) < self.interval_ms {
            return None;
        }
        let snap = MetricsSnapshot::capture(time_ms, field, fleet, clock, self.detection_threshold);
        trace!(time_ms, coverage = snap.coverage_pct, anomalies = snap.anomaly_count, "metrics snapshot");
        self.last_snapshot_ms = time_ms;
        self.snapshots.push(snap);
        self.snapshots.last()
    }

    #[inline]
    pub fn snapshots(&self) -> &[MetricsSnapshot] {
        &self.snapshots
    }

    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.last_snapshot_ms = 0;
    }
}
