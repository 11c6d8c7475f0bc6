//! The `TrackWriter` trait and an in-memory implementation.

use crate::{OutputError, OutputResult, StopRow, TrackRow};

/// Sink for track and stop rows.
pub trait TrackWriter {
    /// Write a batch of track rows.
    fn write_tracks(&mut self, rows: &[TrackRow]) -> OutputResult<()>;

    /// Write a batch of stop rows.
    fn write_stops(&mut self, rows: &[StopRow]) -> OutputResult<()>;

    /// Flush and close the underlying sinks.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Collects rows in memory.
///
/// Lets vehicles simulated on worker threads record independently; the
/// driver drains each buffer into a file writer afterwards.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TrackBuffer {
    pub tracks: Vec<TrackRow>,
    pub stops:  Vec<StopRow>,
    finished:   bool,
}

impl TrackBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Copy everything collected so far into `writer`.
    pub fn drain_into<W: TrackWriter>(&mut self, writer: &mut W) -> OutputResult<()> {
        writer.write_tracks(&self.tracks)?;
        writer.write_stops(&self.stops)?;
        self.tracks.clear();
        self.stops.clear();
        Ok(())
    }
}

impl TrackWriter for TrackBuffer {
    fn write_tracks(&mut self, rows: &[TrackRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.tracks.extend_from_slice(rows);
        Ok(())
    }

    fn write_stops(&mut self, rows: &[StopRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.stops.extend_from_slice(rows);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}
