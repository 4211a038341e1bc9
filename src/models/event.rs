//! Event record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::present::Presentable;
use crate::{CityScoutError, Result};

/// Time text used when the listing gives no timings
pub const TIMINGS_UNAVAILABLE: &str = "Timings unavailable";

/// A listed event spanning `start_date..=end_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    event_name: String,
    categories: Vec<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    time_description: String,
}

impl EventRecord {
    /// Build a record. Fails unless there is at least one category and
    /// `start_date <= end_date`.
    pub fn new(
        event_name: String,
        categories: Vec<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        time_description: String,
    ) -> Result<Self> {
        if categories.is_empty() {
            return Err(CityScoutError::malformed(format!(
                "event '{event_name}' has no categories"
            )));
        }
        if start_date > end_date {
            return Err(CityScoutError::date_parse(
                format!("{start_date} - {end_date}"),
                format!("event '{event_name}' ends before it starts"),
            ));
        }

        Ok(Self {
            event_name,
            categories,
            start_date,
            end_date,
            time_description,
        })
    }

    #[must_use]
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    #[must_use]
    pub fn time_description(&self) -> &str {
        &self.time_description
    }

    /// Inclusive check against the event's date range
    #[must_use]
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date >= date
    }
}

impl Presentable for EventRecord {
    const LABEL_FIELD: &'static str = "EventName";
    const DETAIL_FIELDS: &'static [&'static str] = &["Category", "Start Date", "End Date", "Time"];

    fn label(&self) -> String {
        self.event_name.clone()
    }

    fn details(&self) -> Vec<String> {
        vec![
            self.categories.join(", "),
            self.start_date.format("%Y-%m-%d").to_string(),
            self.end_date.format("%Y-%m-%d").to_string(),
            self.time_description.clone(),
        ]
    }

    fn position(&self) -> Option<(f64, f64)> {
        None
    }
}
