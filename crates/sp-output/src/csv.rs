//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `metrics.csv`
//! - `measurements.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MeasurementRow, MetricsRow, OutputResult};

pub const METRICS_FILE: &str = "metrics.csv";
pub const MEASUREMENTS_FILE: &str = "measurements.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    metrics:      Writer<File>,
    measurements: Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files in it and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut metrics = Writer::from_path(dir.join(METRICS_FILE))?;
        metrics.write_record(["time_s", "coverage_pct", "anomaly_count", "active_count", "charging_count"])?;

        let mut measurements = Writer::from_path(dir.join(MEASUREMENTS_FILE))?;
        measurements.write_record(["drone_id", "time_s", "intensity", "x", "y"])?;

        Ok(Self {
            metrics,
            measurements,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            format!("{:.1}", row.time_s),
            format!("{:.2}", row.coverage_pct),
            row.anomaly_count.to_string(),
            row.active_count.to_string(),
            row.charging_count.to_string(),
        ])?;
        Ok(())
    }

    fn write_measurements(&mut self, rows: &[MeasurementRow]) -> OutputResult<()> {
        for row in rows {
            self.measurements.write_record(&[
                row.drone_id.to_string(),
                format!("{:.1}", row.time_s),
                format!("{:.3}", row.intensity),
                format!("{:.1}", row.x),
                format!("{:.1}", row.y),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.measurements.flush()?;
        Ok(())
    }
}
