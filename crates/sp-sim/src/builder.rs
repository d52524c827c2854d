//! Fluent builder for constructing a [`Sim`].

use sp_coord::{CoverageCoordinator, HotspotRetasker, RetaskPolicy};
use sp_core::{Point, SimConfig, Tick};
use sp_field::{AnomalyField, AnomalyKind};
use sp_fleet::FleetBuilder;
use sp_metrics::MetricsCollector;
use tracing::{info, warn};

use crate::{EventLog, Sim, SimError, SimResult, Trajectories};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                         |
/// |-----------------------|---------------------------------|
/// | `.retask_policy(p)`   | `HotspotRetasker::default()`    |
/// | `.seed_anomaly(..)`   | none; the field starts empty    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::for_scenario(Scenario::Sparse))
///     .retask_policy(NoRetasking)
///     .build()?;
/// sim.start();
/// sim.run_ticks(3_000, &mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: SimConfig,
    policy: Box<dyn RetaskPolicy>,
    seeds:  Vec<(Point, f64, AnomalyKind)>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            policy: Box::new(HotspotRetasker::default()),
            seeds:  Vec::new(),
        }
    }

    /// Replace the reactive retasking policy.
    pub fn retask_policy<P: RetaskPolicy>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Place an anomaly in the field before the first tick.  Re-placed on
    /// every [`Sim::reset`].
    pub fn seed_anomaly(mut self, position: Point, intensity: f64, kind: AnomalyKind) -> Self {
        self.seeds.push((position, intensity, kind));
        self
    }

    /// Validate the config, lay out the coverage plan and return a stopped,
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate()?;
        if config.drone_count == 0 {
            warn!("drone_count is 0; the field will evolve unobserved");
        }
        if config.detection_threshold >= 1.0 {
            warn!(threshold = config.detection_threshold, "detection threshold can never be exceeded");
        }
        if config.snapshot_interval_ms == 0 {
            return Err(SimError::Config("snapshot_interval_ms must be positive".into()));
        }

        let mut field = AnomalyField::new(&config)?;
        for &(position, intensity, kind) in &self.seeds {
            field.insert_anomaly(position, intensity, kind, Tick::ZERO);
        }

        let (mut fleet, rngs) = FleetBuilder::from_config(&config).build();
        let coordinator = CoverageCoordinator::with_policy(&config, &field, self.policy);
        coordinator.assign_initial(&mut fleet);

        info!(
            width = config.grid_width,
            height = config.grid_height,
            drones = config.drone_count,
            seed = config.seed,
            "simulation built"
        );

        Ok(Sim {
            clock:        config.make_clock(),
            metrics:      MetricsCollector::new(&config),
            events:       EventLog::new(config.event_log_capacity),
            trajectories: Trajectories::new(config.drone_count, config.trail_length),
            archive:      Vec::new(),
            seeds:        self.seeds,
            running:      false,
            field,
            fleet,
            rngs,
            coordinator,
            config,
        })
    }
}
