//! A single drone: position, battery, waypoint queue, measurement log, and
//! the per-tick state machine step.

use std::collections::VecDeque;

use sp_core::{BASE, DroneId, Point, SimConfig, Tick};
use tracing::debug;

use crate::Measurement;
use crate::state::{Condition, DroneState, next_state};

/// A waypoint (or the base) counts as reached strictly inside this distance.
pub const ARRIVAL_RADIUS: f64 = 0.5;

/// The slice of [`SimConfig`] a drone needs.  Copied into every drone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DroneParams {
    /// Grid units per second.
    pub speed:          f64,
    pub autonomy_ms:    i64,
    pub recharge_ms:    i64,
    pub measurement_ms: i64,
}

impl DroneParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            speed:          config.drone_speed,
            autonomy_ms:    config.autonomy_ms,
            recharge_ms:    config.recharge_ms,
            measurement_ms: config.measurement_ms,
        }
    }
}

impl Default for DroneParams {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

/// A state change observed over one [`Drone::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: DroneState,
    pub to:   DroneState,
}

/// Result of one [`Drone::update`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    /// Net state change across the step, if any.
    pub transition: Option<Transition>,
    /// Measurements handed over on arrival at base.  Empty otherwise.
    pub uploaded: Vec<Measurement>,
}

#[derive(Clone, Debug)]
pub struct Drone {
    id:       DroneId,
    position: Point,
    target:   Point,
    state:    DroneState,
    params:   DroneParams,

    autonomy_ms:    i64,
    measurement_ms: i64,
    recharge_ms:    i64,

    waypoints:       VecDeque<Point>,
    measurements:    Vec<Measurement>,
    energy_consumed: f64,
}

impl Drone {
    /// A fully charged, `Active` drone at `position` with an empty queue.
    pub fn new(id: DroneId, position: Point, params: DroneParams) -> Self {
        Self {
            id,
            position,
            target: position,
            state: DroneState::Active,
            params,
            autonomy_ms:    params.autonomy_ms,
            measurement_ms: 0,
            recharge_ms:    0,
            waypoints:       VecDeque::new(),
            measurements:    Vec::new(),
            energy_consumed: 0.0,
        }
    }

    /// A new drone parked at [`BASE`].
    pub fn at_base(id: DroneId, params: DroneParams) -> Self {
        Self::new(id, BASE, params)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> DroneId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    #[inline]
    pub fn state(&self) -> DroneState {
        self.state
    }

    #[inline]
    pub fn params(&self) -> &DroneParams {
        &self.params
    }

    /// Remaining flight time in milliseconds.  Never negative.
    #[inline]
    pub fn autonomy_ms(&self) -> i64 {
        self.autonomy_ms
    }

    /// Remaining autonomy as a fraction of a full charge.
    pub fn battery_fraction(&self) -> f64 {
        if self.params.autonomy_ms <= 0 {
            return 0.0;
        }
        self.autonomy_ms as f64 / self.params.autonomy_ms as f64
    }

    #[inline]
    pub fn waypoints(&self) -> &VecDeque<Point> {
        &self.waypoints
    }

    /// Measurements recorded since the last upload.
    #[inline]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    #[inline]
    pub fn energy_consumed(&self) -> f64 {
        self.energy_consumed
    }

    /// `true` when strictly within [`ARRIVAL_RADIUS`] of the base.
    pub fn is_at_base(&self) -> bool {
        self.position.distance_to_base() < ARRIVAL_RADIUS
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Replace the waypoint queue.  The target is refreshed on the next
    /// `Active` update.
    pub fn set_waypoints<I>(&mut self, waypoints: I)
    where
        I: IntoIterator<Item = Point>,
    {
        self.waypoints.clear();
        self.waypoints.extend(waypoints);
    }

    /// A reading of `intensity` stamped at `tick` at the current position.
    /// Not recorded; pass it to [`record_measurement`](Self::record_measurement).
    pub fn measure(&self, intensity: f64, tick: Tick) -> Measurement {
        Measurement::new(intensity, tick, self.position)
    }

    pub fn record_measurement(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Begin a hover measurement.  Only legal from `Active`; returns whether
    /// the drone switched to `Measuring`.
    pub fn start_measurement(&mut self) -> bool {
        self.fire(Condition::MeasurementRequested)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance this drone by `tick_ms` milliseconds.
    pub fn update(&mut self, tick_ms: i64) -> StepOutcome {
        let from = self.state;
        let mut uploaded = Vec::new();
        self.energy_consumed += from.energy_rate();

        match from {
            DroneState::Active => {
                if let Some(&next) = self.waypoints.front() {
                    self.target = next;
                    if self.position.distance(next) < ARRIVAL_RADIUS {
                        self.waypoints.pop_front();
                    }
                }
                self.fly(tick_ms);
                self.drain(tick_ms);
                if self.autonomy_ms <= 0 {
                    self.fire(Condition::BatteryDepleted);
                }
            }
            DroneState::Measuring => {
                self.measurement_ms -= tick_ms;
                self.drain(tick_ms);
                if self.measurement_ms <= 0 {
                    self.fire(Condition::MeasurementDone);
                }
                // Checked last so an empty battery wins over a finished reading.
                if self.autonomy_ms <= 0 {
                    self.fire(Condition::BatteryDepleted);
                }
            }
            DroneState::Returning => {
                if self.is_at_base() {
                    self.fire(Condition::ReachedBase);
                    uploaded = std::mem::take(&mut self.measurements);
                } else {
                    self.target = BASE;
                    self.fly(tick_ms);
                    self.drain(tick_ms);
                }
            }
            DroneState::Charging => {
                self.recharge_ms -= tick_ms;
                if self.recharge_ms <= 0 {
                    self.fire(Condition::Recharged);
                }
            }
        }

        let transition = (self.state != from).then_some(Transition { from, to: self.state });
        StepOutcome { transition, uploaded }
    }

    fn fly(&mut self, tick_ms: i64) {
        let max_step = self.params.speed * tick_ms as f64 / 1000.0;
        self.position = self.position.step_toward(self.target, max_step);
    }

    fn drain(&mut self, tick_ms: i64) {
        self.autonomy_ms = (self.autonomy_ms - tick_ms).max(0);
    }

    /// Apply `condition` through the transition table, running the entry
    /// effect of the new state.  Returns `false` when the pair is illegal.
    fn fire(&mut self, condition: Condition) -> bool {
        let Some(next) = next_state(self.state, condition) else {
            return false;
        };
        match condition {
            Condition::MeasurementRequested => self.measurement_ms = self.params.measurement_ms,
            Condition::MeasurementDone      => {}
            Condition::BatteryDepleted      => self.target = BASE,
            Condition::ReachedBase          => self.recharge_ms = self.params.recharge_ms,
            Condition::Recharged            => self.autonomy_ms = self.params.autonomy_ms,
        }
        debug!(drone = %self.id, from = %self.state, to = %next, "state change");
        self.state = next;
        true
    }
}
