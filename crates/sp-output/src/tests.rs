//! Integration tests for sp-output.

use std::path::Path;

use sp_core::{BASE, SimConfig};
use sp_field::AnomalyKind;
use sp_sim::{Sim, SimBuilder};

fn tmp() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn read_rows(path: &Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    let rows = rdr.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

/// One drone sitting on an anomaly at base, with a battery that lasts two
/// ticks, so it measures on tick 0 and uploads on tick 2.
fn uploading_sim() -> Sim {
    let config = SimConfig {
        drone_count: 1,
        spawn_probability: 0.0,
        autonomy_ms: 400,
        recharge_ms: 200,
        snapshot_interval_ms: 200,
        measure_on_detection: false,
        ..SimConfig::default()
    };
    let mut sim = SimBuilder::new(config)
        .seed_anomaly(BASE, 1.0, AnomalyKind::Pollution)
        .build()
        .unwrap();
    sim.start();
    sim
}

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::{CsvWriter, MEASUREMENTS_FILE, METRICS_FILE};
    use crate::row::{MeasurementRow, MetricsRow};
    use crate::writer::OutputWriter;

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_rows(&dir.path().join(METRICS_FILE));
        assert_eq!(headers, ["time_s", "coverage_pct", "anomaly_count", "active_count", "charging_count"]);
        assert!(rows.is_empty());

        let (headers, _) = read_rows(&dir.path().join(MEASUREMENTS_FILE));
        assert_eq!(headers, ["drone_id", "time_s", "intensity", "x", "y"]);
    }

    #[test]
    fn nested_output_dir_is_created() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        CsvWriter::new(&nested).unwrap();
        assert!(nested.join(METRICS_FILE).exists());
    }

    #[test]
    fn number_formatting() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_metrics(&MetricsRow {
            time_s:         5.0,
            coverage_pct:   1.23456,
            anomaly_count:  3,
            active_count:   6,
            charging_count: 1,
        })
        .unwrap();
        w.write_measurements(&[MeasurementRow { drone_id: 2, time_s: 12.4, intensity: 0.83721, x: 3.04, y: 7.96 }])
            .unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let (_, metrics) = read_rows(&dir.path().join(METRICS_FILE));
        assert_eq!(metrics[0].iter().collect::<Vec<_>>(), ["5.0", "1.23", "3", "6", "1"]);

        let (_, measurements) = read_rows(&dir.path().join(MEASUREMENTS_FILE));
        assert_eq!(measurements[0].iter().collect::<Vec<_>>(), ["2", "12.4", "0.837", "3.0", "8.0"]);
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::csv::{CsvWriter, MEASUREMENTS_FILE, METRICS_FILE};
    use crate::{MeasurementRow, MetricsRow, OutputError, OutputResult, OutputWriter, SimOutputObserver};

    /// Fails every metrics write.
    struct Broken {
        finished: usize,
    }

    impl OutputWriter for Broken {
        fn write_metrics(&mut self, _row: &MetricsRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn write_measurements(&mut self, _rows: &[MeasurementRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn streams_snapshots_and_uploads() {
        let dir = tmp();
        let mut sim = uploading_sim();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, sim.clock());
        sim.run_ticks(3, &mut obs);
        assert!(obs.take_error().is_none());

        let (_, metrics) = read_rows(&dir.path().join(METRICS_FILE));
        // Snapshots at 0.2 s and 0.4 s.
        assert_eq!(metrics.len(), 2);
        assert_eq!(&metrics[0][0], "0.2");

        let (_, measurements) = read_rows(&dir.path().join(MEASUREMENTS_FILE));
        assert_eq!(measurements.len(), 1);
        assert_eq!(&measurements[0][0], "0");
        assert_eq!(&measurements[0][1], "0.0");
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = uploading_sim();
        let mut obs = SimOutputObserver::new(Broken { finished: 0 }, sim.clock());
        sim.run_ticks(3, &mut obs);
        let err = obs.take_error().expect("metrics write should fail");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().finished, 1);
    }
}

#[cfg(test)]
mod export_tests {
    use sp_sim::NoopObserver;

    use super::*;
    use crate::csv::{MEASUREMENTS_FILE, METRICS_FILE};
    use crate::export_run;

    #[test]
    fn export_includes_uploaded_and_on_board() {
        let mut sim = uploading_sim();
        // Tick 2 uploads the tick-0 reading; nothing is on board afterwards.
        sim.run_ticks(3, &mut NoopObserver);
        assert_eq!(sim.uploaded_measurements().len(), 1);

        let dir = tmp();
        export_run(dir.path(), &sim).unwrap();

        let (_, metrics) = read_rows(&dir.path().join(METRICS_FILE));
        assert_eq!(metrics.len(), sim.snapshots().len());

        let (_, measurements) = read_rows(&dir.path().join(MEASUREMENTS_FILE));
        let on_board: usize = sim.drones().iter().map(|d| d.measurements().len()).sum();
        assert_eq!(measurements.len(), 1 + on_board);
    }

    #[test]
    fn export_of_fresh_sim_has_headers_only() {
        let sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        let dir = tmp();
        export_run(dir.path(), &sim).unwrap();
        let (_, metrics) = read_rows(&dir.path().join(METRICS_FILE));
        let (_, measurements) = read_rows(&dir.path().join(MEASUREMENTS_FILE));
        assert!(metrics.is_empty());
        assert!(measurements.is_empty());
    }
}
