//! Raw data sources
//!
//! Each domain has a narrow fetch trait returning the raw, source-shaped
//! payload the normalizers consume:
//! - [`RestaurantSource`]: business search JSON ([`yelp::YelpSource`])
//! - [`ArtSource`]: tabular export ([`art_csv::CsvArtSource`])
//! - [`EventSource`]: scraped listing items ([`events_html::HtmlEventSource`])
//!
//! Fetch failures surface as [`CityScoutError::Fetch`](crate::CityScoutError::Fetch)
//! and are handled by the session, not by the normalizers.

pub mod art_csv;
pub mod events_html;
pub mod http;
pub mod yelp;

use serde::Deserialize;

use crate::Result;

pub use art_csv::CsvArtSource;
pub use events_html::HtmlEventSource;
pub use http::HttpClient;
pub use yelp::YelpSource;

/// Business entry as returned by the search API
#[derive(Debug, Clone, Deserialize)]
pub struct RawBusiness {
    pub name: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub rating: f64,
    pub price: Option<String>,
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub location: RawLocation,
    #[serde(default)]
    pub coordinates: RawCoordinates,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub alias: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub display_address: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Header row plus data rows; `None` marks an empty cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Position of a column by header name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

/// One event listing node, text extracted but not yet interpreted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEventItem {
    /// Text of each category tag, as found
    pub categories: Vec<String>,
    /// Text of the first link in the item
    pub anchor_text: Option<String>,
    /// Date and optional time, `|`-separated
    pub date_time: Option<String>,
}

pub trait RestaurantSource {
    fn fetch_businesses(&self) -> Result<Vec<RawBusiness>>;
}

pub trait ArtSource {
    fn fetch_table(&self) -> Result<RawTable>;
}

pub trait EventSource {
    fn fetch_items(&self) -> Result<Vec<RawEventItem>>;
}
