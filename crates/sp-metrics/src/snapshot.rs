use sp_core::SimClock;
use sp_field::AnomalyField;
use sp_fleet::{DroneState, Fleet};

/// Measurements at which the coordination score's measurement term saturates.
const MEASUREMENT_SATURATION: f64 = 100.0;

/// Performance figures at one instant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    /// Simulated milliseconds since start.
    pub time_ms: u64,

    /// Live anomalies.
    pub anomaly_count:   usize,
    pub active_count:    usize,
    pub measuring_count: usize,
    pub returning_count: usize,
    pub charging_count:  usize,

    /// Measurements held on board across the fleet, not yet uploaded.
    pub total_measurements: usize,

    /// Share of cells above the detection threshold, in percent.
    pub coverage_pct: f64,
    /// Mean creation-to-detection delay over every detection so far.
    /// 0 until the first detection.
    pub detection_latency_ms: f64,
    /// Detected so far / spawned so far, in percent.
    pub success_rate_pct: f64,
    /// `coverage_pct / (total energy / 100)`.
    pub energy_efficiency: f64,
    /// Live anomalies not yet detected.
    pub missed_anomalies: usize,
    /// 0–100 blend of fleet availability and measurement volume.
    pub coordination_score: f64,
}

impl MetricsSnapshot {
    /// Compute every figure from the current world.
    pub fn capture(
        time_ms:             u64,
        field:               &AnomalyField,
        fleet:               &Fleet,
        clock:               &SimClock,
        detection_threshold: f64,
    ) -> Self {
        let cells = field.grid().len();
        let coverage_pct = if cells == 0 {
            0.0
        } else {
            field.grid().count_above(detection_threshold) as f64 / cells as f64 * 100.0
        };

        let detection_latency_ms = field
            .mean_detection_latency_ticks()
            .map_or(0.0, |ticks| ticks * clock.tick_duration_ms as f64);

        let success_rate_pct = match field.total_spawned() {
            0 => 0.0,
            spawned => field.total_detected() as f64 * 100.0 / spawned as f64,
        };

        let energy = fleet.total_energy_consumed();
        let energy_efficiency = if energy == 0.0 { 0.0 } else { coverage_pct / (energy / 100.0) };

        let active_count = fleet.count_in(DroneState::Active);
        let charging_count = fleet.count_in(DroneState::Charging);
        let total_measurements = fleet.pending_measurements();

        let coordination_score = if fleet.is_empty() {
            0.0
        } else {
            let n = fleet.len() as f64;
            let active_ratio = active_count as f64 / n;
            let recharge_ratio = charging_count as f64 / n;
            let measurement_term = (total_measurements as f64 / MEASUREMENT_SATURATION).min(1.0);
            active_ratio * 40.0 + recharge_ratio * 30.0 + measurement_term * 30.0
        };

        Self {
            time_ms,
            anomaly_count: field.anomalies().len(),
            active_count,
            measuring_count: fleet.count_in(DroneState::Measuring),
            returning_count: fleet.count_in(DroneState::Returning),
            charging_count,
            total_measurements,
            coverage_pct,
            detection_latency_ms,
            success_rate_pct,
            energy_efficiency,
            missed_anomalies: field.undetected_count(),
            coordination_score,
        }
    }

    #[inline]
    pub fn time_s(&self) -> f64 {
        self.time_ms as f64 / 1000.0
    }
}
