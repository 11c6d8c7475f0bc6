//! `fleet-output`: telemetry feed for simulated vehicles.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`row`]      | `TrackRow` (one vehicle at one tick), `StopRow`           |
//! | [`writer`]   | `TrackWriter` trait, in-memory `TrackBuffer`              |
//! | [`csv`]      | `CsvTrackWriter`: `tracks.csv` and `stops.csv`            |
//! | [`recorder`] | `TrackRecorder`: samples states into any `TrackWriter`    |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                          |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvTrackWriter, TrackRecorder};
//!
//! let writer = CsvTrackWriter::new(Path::new("./out"))?;
//! let mut recorder = TrackRecorder::new(writer, 6);
//! for tick in 0.. {
//!     state = engine.advance(&state, dt, clock.now(), &mut rng);
//!     recorder.record(tick, clock.now(), &state);
//!     if state.is_complete() { break; }
//! }
//! recorder.finish(&state);
//! if let Some(e) = recorder.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod recorder;
pub mod row;
pub mod writer;


pub use csv::CsvTrackWriter;
pub use error::{OutputError, OutputResult};
pub use recorder::TrackRecorder;
pub use row::{StopRow, TrackRow};
pub use writer::{TrackBuffer, TrackWriter};
