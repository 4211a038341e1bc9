//! Restaurant record model

use serde::{Deserialize, Serialize};

use crate::present::Presentable;

/// A business from the restaurant search, reduced to the fields we query and show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub is_closed: bool,
    pub review_count: u32,
    /// Title of the first category tag
    pub cuisine: String,
    /// 0 to 5 stars
    pub rating: f64,
    /// `$` to `$$$$`, absent when the listing has no price tier
    pub price: Option<String>,
    /// Display address, one entry per line
    pub address: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl RestaurantRecord {
    /// Address lines joined for single-line display
    #[must_use]
    pub fn format_address(&self) -> String {
        self.address.join(", ")
    }
}

impl Presentable for RestaurantRecord {
    const LABEL_FIELD: &'static str = "name";
    const DETAIL_FIELDS: &'static [&'static str] =
        &["address", "cuisine", "price", "rating", "review_count"];

    fn label(&self) -> String {
        self.name.clone()
    }

    fn details(&self) -> Vec<String> {
        vec![
            self.format_address(),
            self.cuisine.clone(),
            self.price.clone().unwrap_or_default(),
            format!("{:.1}", self.rating),
            self.review_count.to_string(),
        ]
    }

    fn position(&self) -> Option<(f64, f64)> {
        Some((self.latitude, self.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_follow_detail_fields() {
        let record = RestaurantRecord {
            name: "Pamela's Diner".to_string(),
            is_closed: false,
            review_count: 1320,
            cuisine: "Diners".to_string(),
            rating: 4.5,
            price: Some("$".to_string()),
            address: vec!["60 21st St".to_string(), "Pittsburgh, PA 15222".to_string()],
            latitude: 40.4514,
            longitude: -79.9850,
        };

        let details = record.details();
        assert_eq!(details.len(), RestaurantRecord::DETAIL_FIELDS.len());
        assert_eq!(details[0], "60 21st St, Pittsburgh, PA 15222");
        assert_eq!(details[2], "$");
        assert_eq!(details[3], "4.5");
        assert_eq!(record.position(), Some((40.4514, -79.9850)));
    }
}
