//! Public art record model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::present::Presentable;

/// Marker for a cell the source left empty
pub const NOT_AVAILABLE: &str = "Not Available";

/// A coordinate cell: a number, or the sentinel when the source had none
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Coordinate {
    Known(f64),
    NotAvailable,
}

impl Coordinate {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Coordinate::Known(v) => Some(v),
            Coordinate::NotAvailable => None,
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Coordinate::Known(_))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Known(v) => write!(f, "{v}"),
            Coordinate::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// A public art installation. Text fields hold [`NOT_AVAILABLE`] when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtRecord {
    pub title: String,
    pub artist_name: String,
    pub art_type: String,
    pub neighborhood: String,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl ArtRecord {
    /// Whether at least one coordinate is known
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.latitude.is_available() || self.longitude.is_available()
    }
}

impl Presentable for ArtRecord {
    const LABEL_FIELD: &'static str = "title";
    const DETAIL_FIELDS: &'static [&'static str] = &["artist_name", "art_type", "neighborhood"];

    fn label(&self) -> String {
        self.title.clone()
    }

    fn details(&self) -> Vec<String> {
        vec![
            self.artist_name.clone(),
            self.art_type.clone(),
            self.neighborhood.clone(),
        ]
    }

    fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude.value()?, self.longitude.value()?))
    }
}
