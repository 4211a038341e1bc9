//! Public art normalizer

use tracing::{info, warn};

use crate::models::{ArtRecord, Coordinate, Dataset, NOT_AVAILABLE};
use crate::sources::RawTable;
use crate::{CityScoutError, Result};

/// Column positions of the fields we keep
struct Columns {
    title: usize,
    artist_name: usize,
    art_type: usize,
    neighborhood: usize,
    latitude: usize,
    longitude: usize,
}

impl Columns {
    fn locate(table: &RawTable) -> Result<Self> {
        let find = |name: &str| {
            table.column(name).ok_or_else(|| {
                CityScoutError::malformed(format!("art data has no '{name}' column"))
            })
        };

        Ok(Self {
            title: find("title")?,
            artist_name: find("artist_name")?,
            art_type: find("art_type")?,
            neighborhood: find("neighborhood")?,
            latitude: find("latitude")?,
            longitude: find("longitude")?,
        })
    }
}

/// Normalize the art table. Absent cells become [`NOT_AVAILABLE`]; rows with
/// neither coordinate are dropped; rows with an unreadable coordinate are skipped.
pub fn normalize_art(table: RawTable) -> Result<Dataset<ArtRecord>> {
    let columns = Columns::locate(&table)?;
    let total = table.rows.len();
    let mut records = Vec::with_capacity(total);
    let mut unplaced = 0;
    let mut malformed = 0;

    for (index, row) in table.rows.iter().enumerate() {
        match to_record(row, &columns) {
            Ok(record) if record.has_position() => records.push(record),
            Ok(_) => unplaced += 1,
            Err(e) => {
                warn!("Skipping art row {}: {}", index + 1, e);
                malformed += 1;
            }
        }
    }

    info!(
        "Normalized {} of {} art rows ({} without position, {} malformed)",
        records.len(),
        total,
        unplaced,
        malformed
    );

    Ok(Dataset::new(records))
}

fn to_record(row: &[Option<String>], columns: &Columns) -> Result<ArtRecord> {
    Ok(ArtRecord {
        title: text(row, columns.title),
        artist_name: text(row, columns.artist_name),
        art_type: text(row, columns.art_type),
        neighborhood: text(row, columns.neighborhood),
        latitude: coordinate(row, columns.latitude, "latitude")?,
        longitude: coordinate(row, columns.longitude, "longitude")?,
    })
}

fn cell(row: &[Option<String>], index: usize) -> Option<&str> {
    row.get(index)
        .and_then(|c| c.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
}

fn text(row: &[Option<String>], index: usize) -> String {
    cell(row, index).unwrap_or(NOT_AVAILABLE).to_string()
}

fn coordinate(row: &[Option<String>], index: usize, name: &str) -> Result<Coordinate> {
    match cell(row, index) {
        None => Ok(Coordinate::NotAvailable),
        Some(NOT_AVAILABLE) => Ok(Coordinate::NotAvailable),
        Some(value) => value
            .parse::<f64>()
            .map(Coordinate::Known)
            .map_err(|_| CityScoutError::malformed(format!("invalid {name} '{value}'"))),
    }
}
