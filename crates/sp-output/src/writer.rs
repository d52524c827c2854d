//! The `OutputWriter` trait implemented by export backends.

use crate::{MeasurementRow, MetricsRow, OutputResult};

pub trait OutputWriter {
    /// Write one metrics snapshot row.
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Write a batch of measurement rows.
    fn write_measurements(&mut self, rows: &[MeasurementRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
