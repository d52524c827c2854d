//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use sp_core::{DroneId, SimClock, Tick};
use sp_fleet::Measurement;
use sp_metrics::MetricsSnapshot;
use sp_sim::SimObserver;

use crate::writer::OutputWriter;
use crate::{MeasurementRow, MetricsRow, OutputError, OutputResult};

/// A [`SimObserver`] that streams every metrics snapshot and every upload
/// at base to an [`OutputWriter`].
///
/// Errors from the writer are stored because `SimObserver` methods have no
/// return value.  Check with [`take_error`][Self::take_error] after the run.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// `clock` converts measurement ticks to seconds; pass `sim.clock()`.
    pub fn new(writer: W, clock: &SimClock) -> Self {
        Self {
            writer,
            clock:      clock.clone(),
            last_error: None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "output write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, snapshot: &MetricsSnapshot) {
        let result = self.writer.write_metrics(&MetricsRow::from(snapshot));
        self.store_err(result);
    }

    fn on_upload(&mut self, drone: DroneId, measurements: &[Measurement]) {
        let rows: Vec<MeasurementRow> = measurements
            .iter()
            .map(|m| MeasurementRow::new(drone, m, &self.clock))
            .collect();
        let result = self.writer.write_measurements(&rows);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
