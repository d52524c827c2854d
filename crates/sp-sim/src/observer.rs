//! Simulation observer trait for progress reporting and data collection.

use sp_core::{DroneId, Tick};
use sp_fleet::Measurement;
use sp_metrics::MetricsSnapshot;

use crate::TickReport;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks].
///
/// All methods have no-op defaults so implementors only override what they
/// care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl SimObserver for Progress {
///     fn on_snapshot(&mut self, snap: &MetricsSnapshot) {
///         println!("{:>6.1}s  coverage {:.2}%", snap.time_s(), snap.coverage_pct);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick is complete.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called whenever the metrics collector records a snapshot.
    fn on_snapshot(&mut self, _snapshot: &MetricsSnapshot) {}

    /// Called when a drone reaches base and hands over its measurement log.
    fn on_upload(&mut self, _drone: DroneId, _measurements: &[Measurement]) {}

    /// Called once at the end of [`Sim::run_ticks`][crate::Sim::run_ticks].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
