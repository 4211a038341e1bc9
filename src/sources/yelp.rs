//! Business search API source

use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{HttpClient, RawBusiness, RestaurantSource};
use crate::config::RestaurantsConfig;
use crate::{CityScoutError, Result};

/// Search response envelope
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub businesses: Vec<RawBusiness>,
    pub total: Option<u64>,
}

/// Single fixed-size business search for one location
pub struct YelpSource {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    location: String,
    limit: u32,
}

impl YelpSource {
    #[must_use]
    pub fn new(http: HttpClient, config: &RestaurantsConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            location: config.location.clone(),
            limit: config.limit,
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}?location={}&limit={}",
            self.base_url,
            urlencoding::encode(&self.location),
            self.limit
        )
    }

    /// Decode a search response body
    pub fn parse_response(body: &str) -> Result<Vec<RawBusiness>> {
        let response: SearchResponse = serde_json::from_str(body).map_err(|e| {
            CityScoutError::fetch(format!("Failed to parse business search response: {e}"))
        })?;
        debug!("Search reported {:?} total businesses", response.total);
        Ok(response.businesses)
    }
}

impl RestaurantSource for YelpSource {
    #[instrument(skip(self), fields(location = %self.location))]
    fn fetch_businesses(&self) -> Result<Vec<RawBusiness>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CityScoutError::fetch(
                "No restaurant API key configured (set CITYSCOUT_RESTAURANTS__API_KEY)",
            )
        })?;

        let response = self.http.get(&self.search_url(), Some(api_key))?;
        let body = response
            .text()
            .map_err(|e| CityScoutError::fetch(format!("Failed to read search response: {e}")))?;

        let businesses = Self::parse_response(&body)?;
        info!("Fetched {} businesses", businesses.len());
        Ok(businesses)
    }
}
