//! # fcl-io: Location Table Loading
//!
//! Reads the backing location table from CSV. The expected layout is the
//! U.S. ZIP-code extract the service was built around (`ZIP`, `LAT`, `LNG`
//! columns), but lower-case and long-form header names are accepted too.
//!
//! Rows without a usable latitude or longitude are dropped; the remaining rows
//! keep their file order so that seeded sampling is stable for a given file.

use fcl_core::{FclError, FclResult, LocationRecord, LocationTable};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const LAT_HEADERS: &[&str] = &["LAT", "lat", "latitude", "Latitude"];
const LNG_HEADERS: &[&str] = &["LNG", "lng", "lon", "longitude", "Longitude"];

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(rename = "ZIP", alias = "zip", alias = "id", default)]
    id: Option<String>,
    #[serde(
        rename = "LAT",
        alias = "lat",
        alias = "latitude",
        alias = "Latitude",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    latitude: Option<f64>,
    #[serde(
        rename = "LNG",
        alias = "lng",
        alias = "lon",
        alias = "longitude",
        alias = "Longitude",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    longitude: Option<f64>,
}

/// Counts reported after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub loaded: usize,
    pub dropped: usize,
}

/// Load the location table from a CSV file.
pub fn load_locations(path: &Path) -> FclResult<LocationTable> {
    info!("Loading location table from {}", path.display());
    let file = File::open(path)?;
    let (table, stats) = read_locations(file)?;
    if table.is_empty() {
        warn!(
            "{} contains no rows with valid coordinates",
            path.display()
        );
    } else {
        info!(
            "Successfully loaded {} rows ({} dropped without coordinates)",
            stats.loaded, stats.dropped
        );
    }
    Ok(table)
}

/// Parse a location table from any CSV reader.
pub fn read_locations<R: Read>(reader: R) -> FclResult<(LocationTable, LoadStats)> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| FclError::Parse(format!("failed to read CSV header: {e}")))?
        .clone();
    require_column(&headers, LAT_HEADERS, "latitude")?;
    require_column(&headers, LNG_HEADERS, "longitude")?;

    let mut records = Vec::new();
    let mut stats = LoadStats::default();
    for (row_idx, row) in rdr.deserialize::<LocationRow>().enumerate() {
        let row = row.map_err(|e| FclError::Parse(format!("row {}: {e}", row_idx + 1)))?;
        match (row.latitude, row.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                let id = row
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| row_idx.to_string());
                records.push(LocationRecord::new(id, lat, lng));
                stats.loaded += 1;
            }
            _ => stats.dropped += 1,
        }
    }

    Ok((LocationTable::new(records), stats))
}

fn require_column(headers: &csv::StringRecord, names: &[&str], what: &str) -> FclResult<()> {
    if headers.iter().any(|h| names.contains(&h)) {
        Ok(())
    } else {
        Err(FclError::Parse(format!(
            "CSV has no {what} column (expected one of {})",
            names.join(", ")
        )))
    }
}
