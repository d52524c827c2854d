//! `sp-output` — CSV export for the swarm_patrol simulator.
//!
//! | File               | Columns                                                        |
//! |--------------------|----------------------------------------------------------------|
//! | `metrics.csv`      | `time_s, coverage_pct, anomaly_count, active_count, charging_count` |
//! | `measurements.csv` | `drone_id, time_s, intensity, x, y`                            |
//!
//! Two ways in: stream while running with [`SimOutputObserver`], or dump a
//! run after the fact with [`export_run`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use sp_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, sim.clock());
//! sim.run_ticks(3_000, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::{export_run, write_run};
pub use observer::SimOutputObserver;
pub use row::{MeasurementRow, MetricsRow};
pub use writer::OutputWriter;
