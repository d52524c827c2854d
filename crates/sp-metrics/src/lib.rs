//! `sp-metrics` — periodic performance snapshots.
//!
//! [`MetricsCollector::maybe_snapshot`] is called once per tick with the
//! elapsed simulated time.  It records a [`MetricsSnapshot`] when at least
//! `snapshot_interval_ms` has passed since the previous one (the first
//! snapshot lands at `t = interval`, not at `t = 0`).

pub mod collector;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use collector::MetricsCollector;
pub use snapshot::MetricsSnapshot;
