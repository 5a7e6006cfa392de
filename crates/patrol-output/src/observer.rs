//! `PositionSnapshotWriter` — a `SimObserver` that records fleet positions.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use patrol_core::Tick;
use patrol_fleet::Dispatcher;
use patrol_net::InspectionNetwork;
use patrol_sim::SimObserver;

use crate::row::PositionRow;
use crate::{OutputError, OutputResult};

/// Writes one [`PositionRow`] per agent at every snapshot tick.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct PositionSnapshotWriter {
    writer: Writer<File>,
    last_error: Option<OutputError>,
    finished: bool,
}

impl PositionSnapshotWriter {
    /// Open (or create) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["tick", "agent_id", "x", "y", "status"])?;
        Ok(Self { writer, last_error: None, finished: false })
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn write_row(&mut self, row: &PositionRow) -> OutputResult<()> {
        self.writer.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.status.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl SimObserver for PositionSnapshotWriter {
    fn on_snapshot(&mut self, tick: Tick, fleet: &Dispatcher, _net: &InspectionNetwork) {
        for uav in fleet.iter() {
            let pos = uav.pos();
            let row = PositionRow {
                tick: tick.0,
                agent_id: uav.id().0,
                x: pos.x,
                y: pos.y,
                status: uav.status(),
            };
            let result = self.write_row(&row);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.finish();
        self.store_err(result);
    }
}
