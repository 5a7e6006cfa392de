//! CSV sink for the compliance time series.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use patrol_core::Tick;

use crate::row::ComplianceRow;
use crate::OutputResult;

/// Writes the sampled compliance series to one CSV file.
///
/// Fed after the run from
/// [`Simulation::compliance_time_series`][patrol_sim::Simulation::compliance_time_series].
pub struct ComplianceCsvWriter {
    writer: Writer<File>,
    finished: bool,
}

impl ComplianceCsvWriter {
    /// Open (or create) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["tick", "percent_fulfilled"])?;
        Ok(Self { writer, finished: false })
    }

    pub fn write_row(&mut self, row: &ComplianceRow) -> OutputResult<()> {
        self.writer.write_record(&[
            row.tick.to_string(),
            row.percent_fulfilled.to_string(),
        ])?;
        Ok(())
    }

    /// Write a whole sampled series in one call.
    pub fn write_series(&mut self, series: &[(Tick, f64)]) -> OutputResult<()> {
        for &(tick, percent_fulfilled) in series {
            self.write_row(&ComplianceRow { tick: tick.0, percent_fulfilled })?;
        }
        Ok(())
    }

    /// Flush the underlying file.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
