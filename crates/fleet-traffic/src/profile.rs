//! Time-of-day and day-of-week congestion multipliers.
//!
//! Both tables are closed enumerations matched exhaustively, so adding a band
//! or day without a multiplier is a compile error rather than a silent 1.0.

use fleet_core::Weekday;

/// Hour-of-day congestion band (local time).
///
/// | Band          | Hours   | Multiplier |
/// |---------------|---------|------------|
/// | `Night`       | 00–06   | 1.00       |
/// | `MorningRush` | 07–09   | 0.60       |
/// | `Daytime`     | 10–11   | 0.90       |
/// | `Midday`      | 12–14   | 0.80       |
/// | `Afternoon`   | 15      | 0.90       |
/// | `EveningRush` | 16–19   | 0.55       |
/// | `Evening`     | 20–23   | 1.00       |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TimeBand {
    Night,
    MorningRush,
    Daytime,
    Midday,
    Afternoon,
    EveningRush,
    Evening,
}

impl TimeBand {
    /// Band for a local hour.  Hours `>= 24` wrap.
    pub fn from_hour(hour: u8) -> TimeBand {
        match hour % 24 {
            0..=6   => TimeBand::Night,
            7..=9   => TimeBand::MorningRush,
            10..=11 => TimeBand::Daytime,
            12..=14 => TimeBand::Midday,
            15      => TimeBand::Afternoon,
            16..=19 => TimeBand::EveningRush,
            _       => TimeBand::Evening,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            TimeBand::Night       => 1.0,
            TimeBand::MorningRush => 0.6,
            TimeBand::Daytime     => 0.9,
            TimeBand::Midday      => 0.8,
            TimeBand::Afternoon   => 0.9,
            TimeBand::EveningRush => 0.55,
            TimeBand::Evening     => 1.0,
        }
    }

    /// `true` for the two commuter peaks.
    #[inline]
    pub fn is_rush(self) -> bool {
        matches!(self, TimeBand::MorningRush | TimeBand::EveningRush)
    }
}

/// Day-of-week multiplier.
///
/// Wednesday is market day and Friday the prayer/commerce day; weekends carry
/// less commercial traffic and run faster than nominal.
pub fn day_multiplier(day: Weekday) -> f64 {
    match day {
        Weekday::Wednesday => 0.8,
        Weekday::Friday    => 0.9,
        Weekday::Saturday | Weekday::Sunday => 1.15,
        Weekday::Monday | Weekday::Tuesday | Weekday::Thursday => 1.0,
    }
}
