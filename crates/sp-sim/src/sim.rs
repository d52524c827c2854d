//! The `Sim` struct and its tick loop.

use sp_coord::{CoverageCoordinator, CoveragePlan};
use sp_core::{DroneId, Point, SimClock, SimConfig, Tick};
use sp_field::{AnomalyField, AnomalyKind};
use sp_fleet::{Drone, DroneRngs, DroneState, Fleet, FleetBuilder, Measurement, StepOutcome, Transition};
use sp_metrics::{MetricsCollector, MetricsSnapshot};
use tracing::{debug, info};

use crate::{EventLog, NoopObserver, SimObserver, TickReport, Trajectories};

/// The simulation engine.
///
/// Sole owner of the field, the fleet, the coverage coordinator and the
/// metrics history.  Driven one tick at a time by the caller; a stopped
/// engine ignores [`tick`](Self::tick).
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub(crate) config:      SimConfig,
    pub(crate) clock:       SimClock,
    pub(crate) field:       AnomalyField,
    pub(crate) fleet:       Fleet,
    pub(crate) rngs:        DroneRngs,
    pub(crate) coordinator: CoverageCoordinator,
    pub(crate) metrics:     MetricsCollector,
    pub(crate) running:     bool,

    pub(crate) events:       EventLog,
    pub(crate) trajectories: Trajectories,
    /// Every measurement uploaded at base since start, in upload order.
    pub(crate) archive:      Vec<(DroneId, Measurement)>,
    /// Anomalies placed before tick 0, re-placed on reset.
    pub(crate) seeds:        Vec<(Point, f64, AnomalyKind)>,
}

impl Sim {
    // ── Lifecycle ─────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            info!(tick = %self.clock.current_tick, "simulation started");
            self.log("simulation started");
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!(tick = %self.clock.current_tick, "simulation stopped");
            self.log("simulation stopped");
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Back to the state right after construction, stopped.  Every random
    /// source is reseeded from `config.seed`, so a reset run replays the
    /// original one exactly.
    pub fn reset(&mut self) {
        self.running = false;
        self.clock.reset();
        self.field.reset();
        for &(position, intensity, kind) in &self.seeds {
            self.field.insert_anomaly(position, intensity, kind, Tick::ZERO);
        }
        (self.fleet, self.rngs) = FleetBuilder::from_config(&self.config).build();
        self.coordinator.reset(&self.field, self.fleet.len());
        self.coordinator.assign_initial(&mut self.fleet);
        self.metrics.reset();
        self.events.clear();
        self.trajectories.clear();
        self.archive.clear();
        info!("simulation reset");
        self.log("simulation reset");
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one tick if running.  Returns `None` when stopped.
    pub fn tick(&mut self) -> Option<TickReport> {
        self.step(&mut NoopObserver)
    }

    /// [`tick`](Self::tick) with observer callbacks.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> Option<TickReport> {
        if !self.running {
            return None;
        }
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let report = self.process_tick(now, observer);
        observer.on_tick_end(&report);
        self.clock.advance();
        Some(report)
    }

    /// Run up to `n` ticks, stopping early if the engine is stopped.
    /// Returns the number of ticks executed.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> u64 {
        let mut done = 0;
        while done < n && self.step(observer).is_some() {
            done += 1;
        }
        observer.on_sim_end(self.clock.current_tick);
        done
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// The next tick to be processed.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Simulated milliseconds elapsed.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    #[inline]
    pub fn field(&self) -> &AnomalyField {
        &self.field
    }

    /// Direct field access for seeding anomalies or zones between ticks.
    #[inline]
    pub fn field_mut(&mut self) -> &mut AnomalyField {
        &mut self.field
    }

    #[inline]
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    #[inline]
    pub fn drones(&self) -> &[Drone] {
        self.fleet.as_slice()
    }

    #[inline]
    pub fn plan(&self) -> &CoveragePlan {
        self.coordinator.plan()
    }

    #[inline]
    pub fn snapshots(&self) -> &[MetricsSnapshot] {
        self.metrics.snapshots()
    }

    #[inline]
    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    #[inline]
    pub fn trajectories(&self) -> &Trajectories {
        &self.trajectories
    }

    /// Measurements already uploaded at base, in upload order.
    #[inline]
    pub fn uploaded_measurements(&self) -> &[(DroneId, Measurement)] {
        &self.archive
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> TickReport {
        let time_ms = self.clock.ms_at(now);
        let time_s = self.clock.secs_at(now);
        let mut report = TickReport { tick: now, time_ms, ..TickReport::default() };

        // ── Phase 1: field ────────────────────────────────────────────────
        report.field = self.field.update(now);
        let spawned = report.field.spawned
            .and_then(|id| self.field.anomalies().iter().find(|a| a.id == id));
        if let Some(a) = spawned {
            let msg = format!(
                "{} ({}) spawned at ({:.0}, {:.0}) intensity {:.2}",
                a.id, a.kind, a.position.x, a.position.y, a.peak_intensity()
            );
            self.events.push(time_s, msg);
        }

        // ── Phase 2: drone updates (optionally parallel) ──────────────────
        let outcomes = self.update_drones();

        // ── Phase 3: per-drone bookkeeping and sensing, in id order ───────
        for (i, outcome) in outcomes.into_iter().enumerate() {
            let id = DroneId(i as u32);
            self.settle(id, outcome, time_s, observer, &mut report);
            self.sense(id, now, time_s, &mut report);
        }

        // ── Phase 4: retasking ────────────────────────────────────────────
        report.retasks = self.coordinator.maybe_retask(now, &self.field, &mut self.fleet);
        for r in &report.retasks {
            self.events.push(time_s, format!("{} retasked to hotspot {}", r.drone, r.hotspot));
        }

        // ── Phase 5: metrics and trails ───────────────────────────────────
        if let Some(snap) = self.metrics.maybe_snapshot(time_ms, &self.field, &self.fleet, &self.clock) {
            observer.on_snapshot(snap);
            report.snapshot = true;
        }
        self.trajectories.record(&self.fleet);

        report
    }

    fn update_drones(&mut self) -> Vec<StepOutcome> {
        let tick_ms = self.clock.tick_duration_ms as i64;

        #[cfg(not(feature = "parallel"))]
        {
            self.fleet.iter_mut().map(|d| d.update(tick_ms)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.fleet
                .as_mut_slice()
                .par_iter_mut()
                .map(|d| d.update(tick_ms))
                .collect()
        }
    }

    /// Record a drone's state change and hand over any upload.
    fn settle<O: SimObserver>(
        &mut self,
        id:       DroneId,
        outcome:  StepOutcome,
        time_s:   f64,
        observer: &mut O,
        report:   &mut TickReport,
    ) {
        if let Some(t) = outcome.transition {
            self.events.push(time_s, format!("{id}: {} -> {}", t.from, t.to));
            report.transitions.push((id, t));
        }
        if !outcome.uploaded.is_empty() {
            observer.on_upload(id, &outcome.uploaded);
            self.events.push(time_s, format!("{id} uploaded {} measurements", outcome.uploaded.len()));
            report.uploaded += outcome.uploaded.len();
            self.archive.extend(outcome.uploaded.into_iter().map(|m| (id, m)));
        }
    }

    /// An `Active` drone over a cell above the detection threshold takes a
    /// noisy reading, marks nearby anomalies detected, and optionally
    /// hovers to measure.
    fn sense(&mut self, id: DroneId, now: Tick, time_s: f64, report: &mut TickReport) {
        let Some(drone) = self.fleet.get_mut(id) else { return };
        if drone.state() != DroneState::Active {
            return;
        }
        let pos = drone.position();
        let value = self.field.intensity_at(pos.x, pos.y);
        if value <= self.config.detection_threshold {
            return;
        }

        let noise = self.rngs.get_mut(id).noise(self.config.measurement_noise);
        let reading = drone.measure(value + noise, now);
        drone.record_measurement(reading);
        report.measurements.push((id, reading));

        let marked = self.field.mark_detected_near(pos, self.config.detection_radius, now);
        if marked.is_empty() {
            return;
        }
        debug!(drone = %id, count = marked.len(), at = %pos, "anomalies detected");
        self.events.push(time_s, format!("{id} detected {} anomalies at {pos}", marked.len()));
        report.detections.extend(marked.iter().map(|&a| (id, a)));

        if self.config.measure_on_detection && drone.start_measurement() {
            self.events.push(time_s, format!("{id}: active -> measuring"));
            let t = Transition { from: DroneState::Active, to: DroneState::Measuring };
            report.transitions.push((id, t));
        }
    }

    fn log(&mut self, message: &str) {
        let time_s = self.clock.secs_at(self.clock.current_tick);
        self.events.push(time_s, message);
    }
}
