//! CSV traffic-zone loader.
//!
//! # CSV format
//!
//! One row per zone, loaded once at startup:
//!
//! ```csv
//! name,lon,lat,radius_m,speed_multiplier
//! central_market,3.3792,6.4541,1200,0.45
//! port_access,3.3650,6.4400,2500,0.7
//! ```
//!
//! Every row is validated through [`TrafficZone::new`]; the first invalid row
//! aborts the load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use fleet_core::Coordinate;

use crate::{CongestionZones, TrafficResult, TrafficZone};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ZoneRecord {
    name:             String,
    lon:              f64,
    lat:              f64,
    radius_m:         f64,
    speed_multiplier: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load congestion zones from a CSV file.
pub fn load_zones_csv(path: &Path) -> TrafficResult<CongestionZones> {
    let file = std::fs::File::open(path)?;
    load_zones_reader(file)
}

/// Like [`load_zones_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or zone tables embedded in
/// the binary.
pub fn load_zones_reader<R: Read>(reader: R) -> TrafficResult<CongestionZones> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut zones = Vec::new();
    for result in csv_reader.deserialize::<ZoneRecord>() {
        let rec = result?;
        zones.push(TrafficZone::new(
            rec.name,
            Coordinate::new(rec.lon, rec.lat),
            rec.radius_m,
            rec.speed_multiplier,
        )?);
    }

    debug!(zones = zones.len(), "traffic zones loaded");
    Ok(CongestionZones::new(zones))
}
