//! The `RetaskPolicy` trait and its two implementations.

use sp_core::{BASE, DroneId, Point};
use sp_field::AnomalyField;
use sp_fleet::{DroneState, Fleet};

/// A cell counts as a hotspot strictly above this intensity.
pub const HOTSPOT_THRESHOLD: f64 = 0.7;

/// A hotspot is attended when an `Active` drone is strictly closer than this.
pub const HOTSPOT_RADIUS: f64 = 5.0;

/// One reassignment made by a policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Retask {
    pub drone:   DroneId,
    pub hotspot: Point,
}

/// Pluggable reactive retasking, run on the coordinator's cadence.
///
/// Implementations read the field and may overwrite drone waypoint queues.
/// They must be deterministic given the same field and fleet.
pub trait RetaskPolicy: Send + Sync + 'static {
    /// Inspect `field` and redirect drones in `fleet`.  Returns every
    /// reassignment in the order it was made.
    fn retask(&self, field: &AnomalyField, fleet: &mut Fleet) -> Vec<Retask>;
}

/// Sends the nearest `Active` drone to every unattended hotspot.
///
/// Hotspots are visited in row-major order.  A hotspot is unattended when
/// no `Active` drone lies within `radius`.  The nearest `Active` drone
/// (lowest id on ties) gets its queue replaced by `[hotspot, BASE]`.  A
/// drone may be reassigned by several hotspots in one pass; the last one
/// wins.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HotspotRetasker {
    pub threshold: f64,
    pub radius:    f64,
}

impl Default for HotspotRetasker {
    fn default() -> Self {
        Self { threshold: HOTSPOT_THRESHOLD, radius: HOTSPOT_RADIUS }
    }
}

impl RetaskPolicy for HotspotRetasker {
    fn retask(&self, field: &AnomalyField, fleet: &mut Fleet) -> Vec<Retask> {
        let mut made = Vec::new();
        for (x, y, _) in field.grid().cells_above(self.threshold) {
            let hotspot = Point::new(x as f64, y as f64);
            let active = || fleet.iter().filter(|d| d.state() == DroneState::Active);

            if active().any(|d| d.position().distance(hotspot) < self.radius) {
                continue;
            }

            let mut nearest: Option<(DroneId, f64)> = None;
            for drone in active() {
                let dist = drone.position().distance(hotspot);
                if nearest.is_none_or(|(_, best)| dist < best) {
                    nearest = Some((drone.id(), dist));
                }
            }

            let Some((id, _)) = nearest else { continue };
            if let Some(drone) = fleet.get_mut(id) {
                drone.set_waypoints([hotspot, BASE]);
                made.push(Retask { drone: id, hotspot });
            }
        }
        made
    }
}

/// Leaves every drone on its initial plan.
pub struct NoRetasking;

impl RetaskPolicy for NoRetasking {
    fn retask(&self, _field: &AnomalyField, _fleet: &mut Fleet) -> Vec<Retask> {
        vec![]
    }
}
