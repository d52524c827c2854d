//! Plain data row types written by output backends.

use sp_core::{DroneId, SimClock};
use sp_fleet::Measurement;
use sp_metrics::MetricsSnapshot;

/// One line of `metrics.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsRow {
    pub time_s:         f64,
    pub coverage_pct:   f64,
    pub anomaly_count:  usize,
    pub active_count:   usize,
    pub charging_count: usize,
}

impl From<&MetricsSnapshot> for MetricsRow {
    fn from(s: &MetricsSnapshot) -> Self {
        Self {
            time_s:         s.time_s(),
            coverage_pct:   s.coverage_pct,
            anomaly_count:  s.anomaly_count,
            active_count:   s.active_count,
            charging_count: s.charging_count,
        }
    }
}

/// One line of `measurements.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRow {
    pub drone_id:  u32,
    pub time_s:    f64,
    pub intensity: f64,
    pub x:         f64,
    pub y:         f64,
}

impl MeasurementRow {
    /// `clock` converts the measurement tick to seconds.
    pub fn new(drone: DroneId, m: &Measurement, clock: &SimClock) -> Self {
        Self {
            drone_id:  drone.0,
            time_s:    clock.secs_at(m.tick),
            intensity: m.intensity,
            x:         m.x,
            y:         m.y,
        }
    }
}
