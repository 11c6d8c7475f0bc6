//! Simulation time model.
//!
//! # Design
//!
//! Wall-clock time is a `Timestamp` holding Unix epoch **milliseconds**.  The
//! motion engine receives both a tick delta (seconds, `f64`) and the
//! wall-clock timestamp of the tick; dwell and delay durations are compared
//! against timestamps, speeds against deltas.
//!
//! Local hour-of-day and weekday are derived with a fixed UTC offset supplied
//! by the caller.  There is no time-zone database: a fleet operates in one
//! region and the offset is part of its configuration.
//!
//! `SimClock` is the fixed-step tick source used by the demo driver and by
//! tests; the engine itself is agnostic to how ticks are produced.

use std::fmt;

use crate::{FleetError, FleetResult};

const MS_PER_SEC: i64 = 1_000;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// An absolute wall-clock instant, Unix epoch milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    /// The instant `minutes` after `self` (rounded to the millisecond).
    #[inline]
    pub fn plus_minutes(self, minutes: f64) -> Timestamp {
        Timestamp(self.0.saturating_add((minutes * 60_000.0).round() as i64))
    }

    /// The instant `secs` after `self` (rounded to the millisecond).
    #[inline]
    pub fn plus_secs(self, secs: f64) -> Timestamp {
        Timestamp(self.0.saturating_add((secs * 1_000.0).round() as i64))
    }

    /// Minutes elapsed from `earlier` to `self`; negative if `earlier` is later.
    #[inline]
    pub fn minutes_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0) as f64 / 60_000.0
    }

    #[inline]
    fn local_secs(self, utc_offset_secs: i32) -> i64 {
        self.0.div_euclid(MS_PER_SEC) + utc_offset_secs as i64
    }

    /// Local hour of day, `0..=23`.
    pub fn hour_of_day(self, utc_offset_secs: i32) -> u8 {
        (self.local_secs(utc_offset_secs).rem_euclid(SECS_PER_DAY) / SECS_PER_HOUR) as u8
    }

    /// Local day of week.
    pub fn weekday(self, utc_offset_secs: i32) -> Weekday {
        Weekday::from_days_since_epoch(self.local_secs(utc_offset_secs).div_euclid(SECS_PER_DAY))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Day of week, Sunday-first (index 0 = Sunday).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Day of week for a count of whole days since 1970-01-01 (a Thursday).
    #[inline]
    pub fn from_days_since_epoch(days: i64) -> Weekday {
        Self::ALL[(days + 4).rem_euclid(7) as usize]
    }

    /// Sunday-first index, `0..=6`.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step tick source mapping tick counts to wall-clock timestamps.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Wall-clock instant of tick 0.
    pub start: Timestamp,
    /// Length of one tick in milliseconds.
    pub tick_duration_ms: u64,
    /// Ticks elapsed so far.
    pub current_tick: u64,
}

impl SimClock {
    pub fn new(start: Timestamp, tick_duration_ms: u64) -> Self {
        Self { start, tick_duration_ms, current_tick: 0 }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick += 1;
    }

    /// Tick length in seconds, the `delta_secs` handed to the engine.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        self.tick_duration_ms as f64 / 1_000.0
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        (self.current_tick * self.tick_duration_ms) as f64 / 1_000.0
    }

    /// Wall-clock timestamp of the current tick.
    #[inline]
    pub fn now(&self) -> Timestamp {
        Timestamp(self.start.0 + (self.current_tick * self.tick_duration_ms) as i64)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_secs() as u64;
        write!(f, "T{} (+{:02}:{:02}:{:02})", self.current_tick, secs / 3_600, (secs % 3_600) / 60, secs % 60)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run configuration for one simulation.
///
/// Typically loaded from a JSON file by the application and shared by every
/// vehicle in the run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix epoch milliseconds of tick 0.
    pub start_unix_ms: i64,

    /// Milliseconds per tick.  Default: 10,000 (10 s).
    pub tick_duration_ms: u64,

    /// Hard stop for the driving loop, in ticks.
    pub max_ticks: u64,

    /// Master seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Offset applied to timestamps before deriving hour and weekday.
    pub utc_offset_secs: i32,

    /// Cruising speed before traffic and events, km/h.
    pub base_speed_kmh: f64,

    /// Payload capacity for vehicles whose route has no delivery waypoints.
    pub default_capacity: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Wednesday 2024-01-03 08:00:00 UTC
            start_unix_ms:    1_704_268_800_000,
            tick_duration_ms: 10_000,
            max_ticks:        8_640,
            seed:             42,
            utc_offset_secs:  0,
            base_speed_kmh:   40.0,
            default_capacity: 100.0,
        }
    }
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(Timestamp(self.start_unix_ms), self.tick_duration_ms)
    }

    /// Reject values no run can use.  Call after loading from a file.
    pub fn validate(&self) -> FleetResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(FleetError::Config("tick_duration_ms must be positive".into()));
        }
        if !self.base_speed_kmh.is_finite() || self.base_speed_kmh < 0.0 {
            return Err(FleetError::Config(format!("base_speed_kmh {} is not a valid speed", self.base_speed_kmh)));
        }
        if !self.default_capacity.is_finite() || self.default_capacity < 0.0 {
            return Err(FleetError::Config(format!("default_capacity {} is not a valid capacity", self.default_capacity)));
        }
        if self.utc_offset_secs.abs() > 14 * 3_600 {
            return Err(FleetError::Config(format!("utc_offset_secs {} is outside ±14 h", self.utc_offset_secs)));
        }
        Ok(())
    }
}
