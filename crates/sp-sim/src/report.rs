//! Per-tick summary, event log and trajectory trails.

use std::collections::VecDeque;

use sp_coord::Retask;
use sp_core::{AnomalyId, DroneId, Point, Tick};
use sp_field::FieldUpdate;
use sp_fleet::{Fleet, Measurement, Transition};

// ── TickReport ────────────────────────────────────────────────────────────────

/// Everything that happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick:    Tick,
    /// Simulated time at the start of the tick.
    pub time_ms: u64,

    pub field:        FieldUpdate,
    pub transitions:  Vec<(DroneId, Transition)>,
    /// Readings recorded this tick, in drone order.
    pub measurements: Vec<(DroneId, Measurement)>,
    pub detections:   Vec<(DroneId, AnomalyId)>,
    /// Number of measurements uploaded at base this tick.
    pub uploaded:     usize,
    pub retasks:      Vec<Retask>,
    /// `true` when a metrics snapshot was recorded.
    pub snapshot:     bool,
}

// ── EventLog ──────────────────────────────────────────────────────────────────

/// Bounded, human-readable history: `"[t=12.4s] drone 3: active -> returning"`.
/// The oldest entry is dropped once `capacity` is reached.
#[derive(Clone, Debug)]
pub struct EventLog {
    capacity: usize,
    entries:  VecDeque<String>,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: VecDeque::with_capacity(capacity.min(1024)) }
    }

    pub fn push(&mut self, time_s: f64, message: impl AsRef<str>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(format!("[t={time_s:.1}s] {}", message.as_ref()));
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ── Trajectories ──────────────────────────────────────────────────────────────

/// The last `capacity` positions of every drone, oldest first.
#[derive(Clone, Debug)]
pub struct Trajectories {
    capacity: usize,
    trails:   Vec<VecDeque<Point>>,
}

impl Trajectories {
    pub fn new(drone_count: usize, capacity: usize) -> Self {
        Self { capacity, trails: vec![VecDeque::new(); drone_count] }
    }

    pub(crate) fn record(&mut self, fleet: &Fleet) {
        if self.capacity == 0 {
            return;
        }
        for (trail, drone) in self.trails.iter_mut().zip(fleet) {
            if trail.len() == self.capacity {
                trail.pop_front();
            }
            trail.push_back(drone.position());
        }
    }

    pub fn trail(&self, drone: DroneId) -> Option<&VecDeque<Point>> {
        self.trails.get(drone.index())
    }

    pub fn clear(&mut self) {
        self.trails.iter_mut().for_each(VecDeque::clear);
    }
}
