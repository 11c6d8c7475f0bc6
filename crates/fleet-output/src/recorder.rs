//! `TrackRecorder<W>`: samples vehicle states into a `TrackWriter`.

use fleet_core::Timestamp;
use fleet_motion::VehicleSimState;

use crate::row::{StopRow, TrackRow};
use crate::writer::TrackWriter;
use crate::{OutputError, OutputResult};

/// Feeds a driving loop's states to any [`TrackWriter`].
///
/// Write errors are stored rather than returned so the loop body stays
/// infallible; check [`take_error`][Self::take_error] once the run is over.
pub struct TrackRecorder<W: TrackWriter> {
    writer:       W,
    /// Record every n-th tick.  Phase changes are always recorded.
    sample_every: u64,
    last_phase:   Option<&'static str>,
    last_error:   Option<OutputError>,
}

impl<W: TrackWriter> TrackRecorder<W> {
    /// `sample_every` of 0 is treated as 1.
    pub fn new(writer: W, sample_every: u64) -> Self {
        Self {
            writer,
            sample_every: sample_every.max(1),
            last_phase: None,
            last_error: None,
        }
    }

    /// Record `state` as of `tick` if it is a sample tick or its phase changed.
    pub fn record(&mut self, tick: u64, now: Timestamp, state: &VehicleSimState) {
        let row = TrackRow::from_state(tick, now, state);
        let phase_changed = self.last_phase != Some(row.phase);
        if tick % self.sample_every != 0 && !phase_changed {
            return;
        }
        self.last_phase = Some(row.phase);
        let result = self.writer.write_tracks(&[row]);
        self.store_err(result);
    }

    /// Write the stop outcomes of the final `state` and close the writer.
    pub fn finish(&mut self, state: &VehicleSimState) {
        let result = self.writer.write_stops(&StopRow::from_state(state));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// First error wins; the run keeps going.
    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "track output failed");
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
