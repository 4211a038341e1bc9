//! Predicate builders
//!
//! Each domain turns raw user answers into a typed criteria value, then into
//! a [`Predicate`]. Parsing failures are [`CityScoutError::InputFormat`] and
//! lead to a re-prompt, never a crash.

use chrono::NaiveDate;
use std::fmt;

use crate::models::{ArtRecord, EventRecord, RestaurantRecord};
use crate::{CityScoutError, Result};

/// Pure boolean test over a record, built once per query attempt
pub struct Predicate<T> {
    test: Box<dyn Fn(&T) -> bool>,
}

impl<T> Predicate<T> {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self {
            test: Box::new(test),
        }
    }

    #[must_use]
    pub fn matches(&self, record: &T) -> bool {
        (self.test)(record)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

/// `price == price ∧ rating ≥ min_rating ∧ review_count ≥ min_reviews`
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantCriteria {
    pub price: String,
    pub min_rating: f64,
    pub min_reviews: u32,
}

impl RestaurantCriteria {
    /// Parse raw answers. The price tier is compared verbatim (whitespace trimmed).
    pub fn parse(price: &str, min_rating: &str, min_reviews: &str) -> Result<Self> {
        let min_rating = min_rating.trim().parse::<f64>().map_err(|_| {
            CityScoutError::input_format(format!(
                "rating must be a number like 4.5, got '{}'",
                min_rating.trim()
            ))
        })?;
        if min_rating.is_nan() {
            return Err(CityScoutError::input_format("rating must be a number like 4.5"));
        }

        let min_reviews = min_reviews.trim().parse::<u32>().map_err(|_| {
            CityScoutError::input_format(format!(
                "review count must be a whole number like 100, got '{}'",
                min_reviews.trim()
            ))
        })?;

        Ok(Self {
            price: price.trim().to_string(),
            min_rating,
            min_reviews,
        })
    }

    #[must_use]
    pub fn predicate(&self) -> Predicate<RestaurantRecord> {
        let criteria = self.clone();
        Predicate::new(move |r: &RestaurantRecord| {
            r.price.as_deref() == Some(criteria.price.as_str())
                && r.rating >= criteria.min_rating
                && r.review_count >= criteria.min_reviews
        })
    }
}

/// Which art field a search compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtSearchMode {
    Neighborhood,
    ArtistName,
    Title,
    All,
}

impl ArtSearchMode {
    /// Menu digit to mode; `None` for anything else
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::Neighborhood),
            "2" => Some(Self::ArtistName),
            "3" => Some(Self::Title),
            "4" => Some(Self::All),
            _ => None,
        }
    }

    /// Question for the search text, `None` when the mode takes no text
    #[must_use]
    pub fn question(self) -> Option<&'static str> {
        match self {
            Self::Neighborhood => Some("Enter neighborhood: "),
            Self::ArtistName => Some("Enter artist name: "),
            Self::Title => Some("Enter name of art installation: "),
            Self::All => None,
        }
    }
}

/// Exact match on one field after title-casing the search text
#[derive(Debug, Clone, PartialEq)]
pub struct ArtCriteria {
    pub mode: ArtSearchMode,
    /// Title-cased search text; empty for [`ArtSearchMode::All`]
    pub text: String,
}

impl ArtCriteria {
    #[must_use]
    pub fn new(mode: ArtSearchMode, text: &str) -> Self {
        let text = match mode {
            ArtSearchMode::All => String::new(),
            _ => title_case(text.trim()),
        };
        Self { mode, text }
    }

    #[must_use]
    pub fn predicate(&self) -> Predicate<ArtRecord> {
        let text = self.text.clone();
        match self.mode {
            ArtSearchMode::Neighborhood => {
                Predicate::new(move |r: &ArtRecord| r.neighborhood == text)
            }
            ArtSearchMode::ArtistName => Predicate::new(move |r: &ArtRecord| r.artist_name == text),
            ArtSearchMode::Title => Predicate::new(move |r: &ArtRecord| r.title == text),
            ArtSearchMode::All => Predicate::new(|_: &ArtRecord| true),
        }
    }
}

/// Events running on `date` (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCriteria {
    pub date: NaiveDate,
}

impl EventCriteria {
    pub fn parse(date: &str) -> Result<Self> {
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map(|date| Self { date })
            .map_err(|_| {
                CityScoutError::input_format(format!(
                    "date must look like YYYY-MM-DD, got '{}'",
                    date.trim()
                ))
            })
    }

    #[must_use]
    pub fn predicate(&self) -> Predicate<EventRecord> {
        let date = self.date;
        Predicate::new(move |e: &EventRecord| e.runs_on(date))
    }
}

/// Capitalize the first letter of every alphabetic run and lower-case the rest:
/// `"o'brien street"` becomes `"O'Brien Street"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}
