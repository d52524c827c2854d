//! `CoverageCoordinator` — owns the plan, the retask policy and its cadence.

use sp_core::{SimConfig, Tick};
use sp_field::AnomalyField;
use sp_fleet::Fleet;
use tracing::info;

use crate::{CoveragePlan, HotspotRetasker, Retask, RetaskPolicy};

pub struct CoverageCoordinator {
    plan:     CoveragePlan,
    policy:   Box<dyn RetaskPolicy>,
    interval: u64,
}

impl CoverageCoordinator {
    /// Plan for `config.drone_count` drones over `field`, with the default
    /// [`HotspotRetasker`].
    pub fn new(config: &SimConfig, field: &AnomalyField) -> Self {
        Self::with_policy(config, field, Box::new(HotspotRetasker::default()))
    }

    pub fn with_policy(config: &SimConfig, field: &AnomalyField, policy: Box<dyn RetaskPolicy>) -> Self {
        Self {
            plan: CoveragePlan::build(field, config.drone_count),
            policy,
            interval: config.retask_interval_ticks,
        }
    }

    #[inline]
    pub fn plan(&self) -> &CoveragePlan {
        &self.plan
    }

    /// Load every drone's queue with its sweep route.
    pub fn assign_initial(&self, fleet: &mut Fleet) {
        for drone in fleet.iter_mut() {
            if let Some(route) = self.plan.route(drone.id()) {
                drone.set_waypoints(route.iter().copied());
            }
        }
    }

    /// Run the policy when `tick` falls on the cadence (ticks 0, n, 2n, …).
    /// An interval of 0 disables retasking.
    ///
    /// Every retasked drone's plan entry is replaced by its new queue, so
    /// [`plan`](Self::plan) always shows what each drone is flying.
    pub fn maybe_retask(&mut self, tick: Tick, field: &AnomalyField, fleet: &mut Fleet) -> Vec<Retask> {
        if !tick.is_every(self.interval) {
            return Vec::new();
        }
        let made = self.policy.retask(field, fleet);
        for r in &made {
            info!(%tick, drone = %r.drone, hotspot = %r.hotspot, "retasked");
            if let Some(drone) = fleet.get(r.drone) {
                self.plan.set_route(r.drone, drone.waypoints().iter().copied().collect());
            }
        }
        made
    }

    /// Rebuild the plan against the (reset) field.
    pub fn reset(&mut self, field: &AnomalyField, drone_count: usize) {
        self.plan = CoveragePlan::build(field, drone_count);
    }
}
