//! Unit tests for sp-field.

use sp_core::{ForbiddenZone, Point, ProfileMode, SimConfig, Tick};

use crate::{AnomalyField, AnomalyKind};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 50×50 field that never spawns on its own.
fn quiet_config() -> SimConfig {
    SimConfig { spawn_probability: 0.0, ..SimConfig::default() }
}

fn quiet_field() -> AnomalyField {
    AnomalyField::new(&quiet_config()).unwrap()
}

fn grid_is_zero(field: &AnomalyField) -> bool {
    field.grid().as_slice().iter().all(|&v| v == 0.0)
}

fn assert_grid_in_unit_range(field: &AnomalyField) {
    for &v in field.grid().as_slice() {
        assert!((0.0..=1.0).contains(&v), "cell out of range: {v}");
    }
}

// ── Anomaly ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod anomaly {
    use sp_core::AnomalyId;

    use super::*;
    use crate::{Anomaly, Detection};

    #[test]
    fn intensity_clamped_on_creation() {
        let a = Anomaly::new(AnomalyId(0), Point::new(1.0, 1.0), 1.7, AnomalyKind::Radiation, Tick(0));
        assert_eq!(a.intensity(), 1.0);
        assert_eq!(a.peak_intensity(), 1.0);
    }

    #[test]
    fn alive_floor_is_exclusive() {
        let mut a = Anomaly::new(AnomalyId(0), Point::default(), 0.02, AnomalyKind::Pollution, Tick(0));
        assert!(a.is_alive());
        a.decay(0.5);
        assert!(!a.is_alive(), "0.01 is at the floor and must be dead");
    }

    #[test]
    fn first_detection_wins() {
        let mut a = Anomaly::new(AnomalyId(0), Point::default(), 0.8, AnomalyKind::Pollution, Tick(4));
        assert_eq!(a.detection(), Detection::Undetected);
        assert_eq!(a.detection_latency(), None);
        assert!(a.mark_detected(Tick(10)));
        assert!(!a.mark_detected(Tick(20)));
        assert_eq!(a.detection(), Detection::Detected(Tick(10)));
        assert_eq!(a.detection_latency(), Some(6));
    }

    #[test]
    fn kind_profiles() {
        assert_eq!(AnomalyKind::Pollution.profile().decay_rate, 0.90);
        assert_eq!(AnomalyKind::StructuralFailure.profile().diffusion_factor, 0.05);
        assert_eq!(AnomalyKind::Radiation.profile().decay_rate, 0.85);
        assert_eq!(AnomalyKind::StructuralFailure.to_string(), "structural failure");
    }
}

// ── Construction and lookup ───────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn starts_empty() {
        let field = quiet_field();
        assert_eq!((field.width(), field.height()), (50, 50));
        assert!(field.anomalies().is_empty());
        assert_eq!(field.total_spawned(), 0);
        assert!(grid_is_zero(&field));
    }

    #[test]
    fn empty_grid_rejected() {
        let config = SimConfig { grid_height: 0, ..SimConfig::default() };
        assert!(AnomalyField::new(&config).is_err());
    }

    #[test]
    fn out_of_bounds_lookup_is_zero() {
        let field = quiet_field();
        assert_eq!(field.intensity_at(-1.0, -1.0), 0.0);
        assert_eq!(field.intensity_at(100.0, 100.0), 0.0);
        assert_eq!(field.intensity_at(50.0, 0.0), 0.0);
        assert_eq!(field.intensity_at(-0.01, 3.0), 0.0);
    }

    #[test]
    fn lookup_floors_instead_of_interpolating() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(10.0, 10.0), 1.0, AnomalyKind::Pollution, Tick(0));
        field.update(Tick(0));

        let centre = field.intensity_at(10.0, 10.0);
        assert_eq!(field.intensity_at(10.99, 10.99), centre);
        assert_eq!(field.intensity_at(10.5, 10.0), centre);
        assert!(field.intensity_at(9.99, 10.0) < centre);
    }
}

// ── Update pipeline ───────────────────────────────────────────────────────────

#[cfg(test)]
mod update {
    use super::*;

    #[test]
    fn decay_applies_after_deposit() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(25.0, 25.0), 1.0, AnomalyKind::Pollution, Tick(0));

        field.update(Tick(0));
        assert!((field.intensity_at(25.0, 25.0) - 1.0).abs() < 1e-12);

        field.update(Tick(1));
        assert!((field.intensity_at(25.0, 25.0) - 0.95).abs() < 1e-12);
    }

    #[test]
    fn diffusion_adds_factor_over_eight_to_each_neighbour() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(25.0, 25.0), 1.0, AnomalyKind::Pollution, Tick(0));
        field.update(Tick(0));

        let expected = 1.0 * 0.1 / 8.0;
        for (dx, dy) in [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)] {
            let v = field.intensity_at(25.0 + dx as f64, 25.0 + dy as f64);
            assert!((v - expected).abs() < 1e-12, "neighbour ({dx},{dy}) = {v}");
        }
        assert_eq!(field.intensity_at(27.0, 25.0), 0.0, "diffusion is one ring per tick");
    }

    #[test]
    fn corner_diffusion_drops_out_of_bounds_share() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(0.0, 0.0), 0.8, AnomalyKind::Pollution, Tick(0));
        field.update(Tick(0));

        let spread = 0.8 * 0.1 / 8.0;
        assert!((field.intensity_at(1.0, 0.0) - spread).abs() < 1e-12);
        assert!((field.intensity_at(1.0, 1.0) - spread).abs() < 1e-12);
        let total: f64 = field.grid().as_slice().iter().sum();
        assert!((total - (0.8 + 3.0 * spread)).abs() < 1e-12);
    }

    #[test]
    fn stacked_anomalies_clamp_to_one() {
        let mut field = quiet_field();
        for _ in 0..3 {
            field.insert_anomaly(Point::new(5.0, 5.0), 0.9, AnomalyKind::Radiation, Tick(0));
        }
        field.update(Tick(0));
        assert_eq!(field.intensity_at(5.0, 5.0), 1.0);
        assert_grid_in_unit_range(&field);
    }

    #[test]
    fn anomaly_expires_below_floor() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(5.0, 5.0), 0.02, AnomalyKind::Radiation, Tick(0));
        let report = field.update(Tick(0));
        // 0.02 × 0.95 = 0.019 → alive
        assert_eq!(report.expired, 0);
        let mut ticks = 1;
        loop {
            let report = field.update(Tick(ticks));
            ticks += 1;
            if report.expired == 1 {
                break;
            }
            assert!(ticks < 100, "anomaly never expired");
        }
        assert!(field.anomalies().is_empty());
        assert_eq!(field.total_spawned(), 1);
    }

    #[test]
    fn off_grid_anomaly_decays_without_deposit() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(80.0, 80.0), 1.0, AnomalyKind::Pollution, Tick(0));
        field.update(Tick(0));
        assert!(grid_is_zero(&field));
        assert!((field.anomalies()[0].intensity() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn certain_spawn_every_tick() {
        let config = SimConfig { spawn_probability: 1.0, ..SimConfig::default() };
        let mut field = AnomalyField::new(&config).unwrap();
        for t in 0..20 {
            let report = field.update(Tick(t));
            assert!(report.spawned.is_some());
        }
        assert_eq!(field.total_spawned(), 20);
        for a in field.anomalies() {
            assert!(a.peak_intensity() >= 0.5 && a.peak_intensity() < 1.0);
            assert!(a.position.x >= 0.0 && a.position.x < 50.0);
            assert_eq!(a.position.x.fract(), 0.0);
        }
    }

    #[test]
    fn grid_stays_in_unit_range_under_heavy_spawning() {
        let config = SimConfig {
            spawn_probability: 1.0,
            diffusion_factor:  0.8,
            grid_width:        8,
            grid_height:       8,
            ..SimConfig::default()
        };
        let mut field = AnomalyField::new(&config).unwrap();
        for t in 0..500 {
            field.update(Tick(t));
            assert_grid_in_unit_range(&field);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let config = SimConfig { spawn_probability: 0.3, ..SimConfig::default() };
        let mut a = AnomalyField::new(&config).unwrap();
        let mut b = AnomalyField::new(&config).unwrap();
        for t in 0..300 {
            assert_eq!(a.update(Tick(t)), b.update(Tick(t)));
        }
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.anomalies(), b.anomalies());
    }
}

// ── Per-kind profiles ─────────────────────────────────────────────────────────

#[cfg(test)]
mod per_kind {
    use super::*;

    fn per_kind_field() -> AnomalyField {
        let config = SimConfig { profile_mode: ProfileMode::PerKind, ..quiet_config() };
        AnomalyField::new(&config).unwrap()
    }

    #[test]
    fn kind_decay_rate_used() {
        let mut field = per_kind_field();
        field.insert_anomaly(Point::new(10.0, 10.0), 1.0, AnomalyKind::Radiation, Tick(0));
        field.update(Tick(0));
        field.update(Tick(1));
        assert!((field.intensity_at(10.0, 10.0) - 0.85).abs() < 1e-12);
    }

    #[test]
    fn kind_diffusion_used() {
        let mut field = per_kind_field();
        field.insert_anomaly(Point::new(10.0, 10.0), 1.0, AnomalyKind::Pollution, Tick(0));
        field.update(Tick(0));
        assert!((field.intensity_at(11.0, 10.0) - 0.15 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_cell_uses_weighted_diffusion() {
        let mut field = per_kind_field();
        field.insert_anomaly(Point::new(10.0, 10.0), 0.4, AnomalyKind::Pollution, Tick(0));
        field.insert_anomaly(Point::new(10.0, 10.0), 0.4, AnomalyKind::StructuralFailure, Tick(0));
        field.update(Tick(0));
        // (0.4·0.15 + 0.4·0.05) / 8
        let expected = (0.4 * 0.15 + 0.4 * 0.05) / 8.0;
        assert!((field.intensity_at(10.0, 11.0) - expected).abs() < 1e-12);
    }
}

// ── Detection bookkeeping ─────────────────────────────────────────────────────

#[cfg(test)]
mod detection {
    use super::*;

    #[test]
    fn marks_only_within_radius() {
        let mut field = quiet_field();
        let near = field.insert_anomaly(Point::new(10.0, 10.0), 0.9, AnomalyKind::Pollution, Tick(0));
        field.insert_anomaly(Point::new(12.0, 10.0), 0.9, AnomalyKind::Pollution, Tick(0));

        let marked = field.mark_detected_near(Point::new(10.5, 10.0), 1.0, Tick(5));
        assert_eq!(marked, vec![near]);
        assert_eq!(field.total_detected(), 1);
        assert_eq!(field.undetected_count(), 1);
        assert_eq!(field.mean_detection_latency_ticks(), Some(5.0));
    }

    #[test]
    fn radius_is_strict() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(10.0, 10.0), 0.9, AnomalyKind::Pollution, Tick(0));
        assert!(field.mark_detected_near(Point::new(11.0, 10.0), 1.0, Tick(1)).is_empty());
    }

    #[test]
    fn redetection_not_counted() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(3.0, 3.0), 0.9, AnomalyKind::Pollution, Tick(2));
        field.mark_detected_near(Point::new(3.0, 3.0), 1.0, Tick(4));
        assert!(field.mark_detected_near(Point::new(3.0, 3.0), 1.0, Tick(9)).is_empty());
        assert_eq!(field.total_detected(), 1);
        assert_eq!(field.mean_detection_latency_ticks(), Some(2.0));
    }

    #[test]
    fn detected_totals_survive_expiry() {
        let mut field = quiet_field();
        field.insert_anomaly(Point::new(3.0, 3.0), 0.05, AnomalyKind::Pollution, Tick(0));
        field.mark_detected_near(Point::new(3.0, 3.0), 1.0, Tick(0));
        for t in 0..100 {
            field.update(Tick(t));
        }
        assert!(field.anomalies().is_empty());
        assert_eq!(field.total_detected(), 1);
    }
}

// ── Forbidden zones and reset ─────────────────────────────────────────────────

#[cfg(test)]
mod zones {
    use super::*;

    #[test]
    fn traversability() {
        let mut field = quiet_field();
        field.add_forbidden_zone(ForbiddenZone::new(20, 20, 4, 4, "building")).unwrap();
        assert!(!field.is_traversable(Point::new(21.5, 22.0)));
        assert!(field.is_traversable(Point::new(24.0, 22.0)));
        assert!(!field.is_cell_traversable(23, 23));
        assert!(field.is_cell_traversable(24, 23));
    }

    #[test]
    fn zone_outside_grid_rejected() {
        let mut field = quiet_field();
        assert!(field.add_forbidden_zone(ForbiddenZone::new(60, 0, 5, 5, "offshore")).is_err());
        assert!(field.add_forbidden_zone(ForbiddenZone::new(-10, 0, 5, 5, "west")).is_err());
        assert!(field.add_forbidden_zone(ForbiddenZone::new(48, 48, 5, 5, "corner")).is_ok());
    }

    #[test]
    fn reset_restores_configured_zones_and_reseeds() {
        let config = SimConfig {
            spawn_probability: 0.5,
            forbidden_zones:   vec![ForbiddenZone::new(0, 40, 10, 10, "lake")],
            ..SimConfig::default()
        };
        let mut field = AnomalyField::new(&config).unwrap();
        field.add_forbidden_zone(ForbiddenZone::new(5, 5, 2, 2, "tent")).unwrap();
        let first: Vec<_> = (0..50).map(|t| field.update(Tick(t))).collect();
        field.mark_detected_near(Point::new(0.0, 0.0), 100.0, Tick(50));

        field.reset();
        assert_eq!(field.forbidden_zones().len(), 1);
        assert_eq!(field.forbidden_zones()[0].name, "lake");
        assert_eq!(field.total_spawned(), 0);
        assert_eq!(field.total_detected(), 0);
        assert!(grid_is_zero(&field));

        let second: Vec<_> = (0..50).map(|t| field.update(Tick(t))).collect();
        assert_eq!(first, second);
    }
}
