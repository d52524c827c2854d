//! One-shot export of a finished (or paused) run.

use std::path::Path;

use sp_sim::Sim;
use tracing::info;

use crate::writer::OutputWriter;
use crate::{CsvWriter, MeasurementRow, MetricsRow, OutputResult};

/// Write every snapshot to `metrics.csv`, and every measurement, uploaded
/// or still on board, to `measurements.csv`, both under `dir`.
///
/// Uploaded measurements come first in upload order, followed by each
/// drone's on-board log in drone order.
pub fn export_run(dir: &Path, sim: &Sim) -> OutputResult<()> {
    let mut writer = CsvWriter::new(dir)?;
    write_run(&mut writer, sim)?;
    info!(dir = %dir.display(), snapshots = sim.snapshots().len(), "run exported");
    Ok(())
}

/// [`export_run`] against any backend.  Calls `finish` on success.
pub fn write_run<W: OutputWriter>(writer: &mut W, sim: &Sim) -> OutputResult<()> {
    for snapshot in sim.snapshots() {
        writer.write_metrics(&MetricsRow::from(snapshot))?;
    }

    let clock = sim.clock();
    let uploaded: Vec<MeasurementRow> = sim
        .uploaded_measurements()
        .iter()
        .map(|(drone, m)| MeasurementRow::new(*drone, m, clock))
        .collect();
    writer.write_measurements(&uploaded)?;

    for drone in sim.drones() {
        let rows: Vec<MeasurementRow> = drone
            .measurements()
            .iter()
            .map(|m| MeasurementRow::new(drone.id(), m, clock))
            .collect();
        writer.write_measurements(&rows)?;
    }

    writer.finish()
}
