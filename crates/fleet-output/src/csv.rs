//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `tracks.csv`
//! - `stops.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TrackWriter;
use crate::{OutputError, OutputResult, StopRow, TrackRow};

pub const TRACK_HEADER: [&str; 11] = [
    "vehicle_id",
    "tick",
    "timestamp_ms",
    "lon",
    "lat",
    "bearing",
    "speed_kmh",
    "phase",
    "segment_index",
    "capacity",
    "active_events",
];

pub const STOP_HEADER: [&str; 7] = [
    "vehicle_id",
    "facility_id",
    "route_index",
    "arrived_at_ms",
    "departed_at_ms",
    "dwell_minutes",
    "delivered_quantity",
];

/// Writes track and stop rows to two CSV files.
pub struct CsvTrackWriter {
    tracks:   Writer<File>,
    stops:    Writer<File>,
    finished: bool,
}

impl CsvTrackWriter {
    /// Create the two CSV files in `dir` and write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut tracks = Writer::from_path(dir.join("tracks.csv"))?;
        tracks.write_record(TRACK_HEADER)?;

        let mut stops = Writer::from_path(dir.join("stops.csv"))?;
        stops.write_record(STOP_HEADER)?;

        tracing::debug!(dir = %dir.display(), "csv track writer opened");
        Ok(Self { tracks, stops, finished: false })
    }
}

fn optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl TrackWriter for CsvTrackWriter {
    fn write_tracks(&mut self, rows: &[TrackRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for row in rows {
            self.tracks.write_record(&[
                row.vehicle_id.to_string(),
                row.tick.to_string(),
                row.timestamp_ms.to_string(),
                format!("{:.6}", row.lon),
                format!("{:.6}", row.lat),
                format!("{:.1}", row.bearing),
                format!("{:.2}", row.speed_kmh),
                row.phase.to_owned(),
                row.segment_index.to_string(),
                row.capacity.to_string(),
                row.active_events.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_stops(&mut self, rows: &[StopRow]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for row in rows {
            self.stops.write_record(&[
                row.vehicle_id.to_string(),
                row.facility_id.to_string(),
                row.route_index.to_string(),
                optional(row.arrived_at_ms),
                optional(row.departed_at_ms),
                row.dwell_minutes.to_string(),
                row.delivered_quantity.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.tracks.flush()?;
        self.stops.flush()?;
        Ok(())
    }
}
