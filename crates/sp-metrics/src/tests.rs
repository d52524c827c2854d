//! Unit tests for sp-metrics.

use sp_core::{DroneId, Point, SimClock, SimConfig, Tick};
use sp_field::{AnomalyField, AnomalyKind};
use sp_fleet::{Fleet, FleetBuilder};

use crate::{MetricsCollector, MetricsSnapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn quiet_config() -> SimConfig {
    SimConfig { spawn_probability: 0.0, ..SimConfig::default() }
}

/// One full-strength anomaly at (10, 10), rendered.
fn field_with_hotspot() -> AnomalyField {
    let mut field = AnomalyField::new(&quiet_config()).unwrap();
    field.insert_anomaly(Point::new(10.0, 10.0), 1.0, AnomalyKind::Pollution, Tick(0));
    field.update(Tick(0));
    field
}

fn fresh_fleet() -> Fleet {
    FleetBuilder::from_config(&quiet_config()).build().0
}

fn capture(field: &AnomalyField, fleet: &Fleet) -> MetricsSnapshot {
    MetricsSnapshot::capture(5_000, field, fleet, &SimClock::new(200), 0.3)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Gate ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod gate {
    use super::*;

    #[test]
    fn one_snapshot_per_interval() {
        let field = field_with_hotspot();
        let fleet = fresh_fleet();
        let clock = SimClock::new(200);
        let mut metrics = MetricsCollector::new(&quiet_config());

        assert!(metrics.maybe_snapshot(0, &field, &fleet, &clock).is_none());
        assert!(metrics.maybe_snapshot(4_800, &field, &fleet, &clock).is_none());
        assert_eq!(metrics.maybe_snapshot(5_000, &field, &fleet, &clock).map(|s| s.time_ms), Some(5_000));
        assert!(metrics.maybe_snapshot(5_200, &field, &fleet, &clock).is_none());
        assert!(metrics.maybe_snapshot(10_000, &field, &fleet, &clock).is_some());
        assert_eq!(metrics.snapshots().len(), 2);
        assert_eq!(metrics.snapshots().last().map(|s| s.time_ms), Some(10_000));
    }

    #[test]
    fn reset_clears_history_and_gate() {
        let field = field_with_hotspot();
        let fleet = fresh_fleet();
        let clock = SimClock::new(200);
        let mut metrics = MetricsCollector::new(&quiet_config());
        metrics.maybe_snapshot(20_000, &field, &fleet, &clock);
        metrics.reset();
        assert!(metrics.snapshots().is_empty());
        assert!(metrics.maybe_snapshot(5_000, &field, &fleet, &clock).is_some());
    }
}

// ── Formulas ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod formulas {
    use super::*;

    #[test]
    fn fresh_world() {
        let snap = capture(&field_with_hotspot(), &fresh_fleet());
        assert_eq!(snap.anomaly_count, 1);
        assert_eq!(snap.active_count, 7);
        assert_eq!(snap.charging_count, 0);
        assert!(close(snap.coverage_pct, 100.0 / 2_500.0));
        assert_eq!(snap.success_rate_pct, 0.0);
        assert_eq!(snap.detection_latency_ms, 0.0);
        assert_eq!(snap.energy_efficiency, 0.0);
        assert_eq!(snap.missed_anomalies, 1);
        assert!(close(snap.coordination_score, 40.0));
        assert!(close(snap.time_s(), 5.0));
    }

    #[test]
    fn detection_feeds_latency_and_success() {
        let mut field = field_with_hotspot();
        field.mark_detected_near(Point::new(10.0, 10.0), 1.0, Tick(25));
        let snap = capture(&field, &fresh_fleet());
        assert!(close(snap.detection_latency_ms, 5_000.0));
        assert!(close(snap.success_rate_pct, 100.0));
        assert_eq!(snap.missed_anomalies, 0);
    }

    #[test]
    fn energy_efficiency_scales_with_consumption() {
        let mut fleet = fresh_fleet();
        for d in fleet.iter_mut() {
            d.update(200);
        }
        let snap = capture(&field_with_hotspot(), &fleet);
        assert!(close(snap.energy_efficiency, 0.04 / (7.0 / 100.0)));
    }

    #[test]
    fn measurement_term_saturates() {
        let mut fleet = fresh_fleet();
        if let Some(d) = fleet.get_mut(DroneId(0)) {
            for i in 0..150 {
                let m = d.measure(0.5, Tick(i));
                d.record_measurement(m);
            }
        }
        let snap = capture(&field_with_hotspot(), &fleet);
        assert_eq!(snap.total_measurements, 150);
        assert!(close(snap.coordination_score, 70.0));
    }

    #[test]
    fn empty_fleet_scores_zero() {
        let fleet = FleetBuilder::new(0, 1).build().0;
        let snap = capture(&field_with_hotspot(), &fleet);
        assert_eq!(snap.coordination_score, 0.0);
        assert_eq!(snap.active_count, 0);
    }
}
