//! Date and time text handling for scraped event listings
//!
//! Range splitting policy:
//! 1. split on a dash (`-`, `–`, `—`) with whitespace on both sides;
//! 2. otherwise, if the text has exactly one bare `-` and does not parse as a
//!    date by itself (so ISO dates stay whole), split on that dash;
//! 3. more than two parts is an error.
//!
//! An end part that is only a day number (`June 1-3`) borrows the start's
//! month and year. Dates without a year take the reference year.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::models::TIMINGS_UNAVAILABLE;
use crate::{CityScoutError, Result};

static SPACED_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-\u{2013}\u{2014}]\s+").expect("valid regex"));
static LEADING_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").expect("valid regex")
});
static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("valid regex"));
static SEPT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsept\b").expect("valid regex"));
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\d-])\d{4}(?:$|\D)").expect("valid regex"));
static DAY_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?:,?\s+(\d{4}))?$").expect("valid regex"));

const WITH_YEAR: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%B %d %Y"];
const WITHOUT_YEAR: &str = "%B %d %Y";

/// A parsed calendar date and whether the text carried its own year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub had_year: bool,
}

/// Split a `date | time` blob into trimmed date text and time text.
/// A blob without `|` (or with an empty time part) gets [`TIMINGS_UNAVAILABLE`].
#[must_use]
pub fn split_date_time(blob: &str) -> (String, String) {
    let cleaned = blob.replace('\t', "");
    let mut parts = cleaned.trim().split('|');
    let date = parts.next().unwrap_or_default().trim().to_string();
    let time = parts.map(str::trim).collect::<Vec<_>>().join(" | ");
    let time = time.trim();

    if time.is_empty() {
        (date, TIMINGS_UNAVAILABLE.to_string())
    } else {
        (date, time.to_string())
    }
}

/// Split date text into one or two range parts
pub fn split_range(date_text: &str) -> Result<Vec<String>> {
    let text = date_text.trim();
    if text.is_empty() {
        return Err(CityScoutError::date_parse(date_text, "empty date"));
    }

    let mut parts: Vec<String> = SPACED_DASH
        .split(text)
        .map(|p| p.trim().to_string())
        .collect();

    if parts.len() == 1 && text.matches('-').count() == 1 && parse_date(text, 2000).is_err() {
        parts = text.split('-').map(|p| p.trim().to_string()).collect();
    }

    if parts.len() > 2 {
        return Err(CityScoutError::date_parse(
            date_text,
            format!("expected at most two range parts, found {}", parts.len()),
        ));
    }
    if parts.iter().any(String::is_empty) {
        return Err(CityScoutError::date_parse(date_text, "empty range part"));
    }

    Ok(parts)
}

/// Parse one date, falling back to `reference_year` when the text has none
pub fn parse_date(text: &str, reference_year: i32) -> Result<ParsedDate> {
    let cleaned = clean(text);

    // chrono's %Y also takes signed short years, so `June 1-3` would read as year -3
    if YEAR_TOKEN.is_match(&cleaned) {
        let parsed = WITH_YEAR.iter().find_map(|format| {
            NaiveDate::parse_from_str(&cleaned, format)
                .ok()
                .filter(|date| (1000..=9999).contains(&date.year()))
        });
        if let Some(date) = parsed {
            return Ok(ParsedDate {
                date,
                had_year: true,
            });
        }
    }

    NaiveDate::parse_from_str(&format!("{cleaned} {reference_year}"), WITHOUT_YEAR)
        .map_err(|e| CityScoutError::date_parse(text, e.to_string()))
        .and_then(|date| {
            if date.year() == reference_year {
                Ok(ParsedDate {
                    date,
                    had_year: false,
                })
            } else {
                Err(CityScoutError::date_parse(text, "unexpected year"))
            }
        })
}

/// Parse date text into an inclusive `(start, end)` pair
pub fn parse_range(date_text: &str, reference_year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let parts = split_range(date_text)?;

    match parts.as_slice() {
        [single] => {
            let date = parse_date(single, reference_year)?.date;
            Ok((date, date))
        }
        [start, end] => {
            if let Some(caps) = DAY_ONLY.captures(end) {
                let year = caps
                    .get(2)
                    .and_then(|y| y.as_str().parse::<i32>().ok())
                    .unwrap_or(reference_year);
                let day = caps[1]
                    .parse::<u32>()
                    .map_err(|e| CityScoutError::date_parse(date_text, e.to_string()))?;
                let start = parse_date(start, year)?.date;
                let end = NaiveDate::from_ymd_opt(start.year(), start.month(), day)
                    .ok_or_else(|| CityScoutError::date_parse(date_text, "invalid end day"))?;
                return Ok((start, end));
            }

            let end = parse_date(end, reference_year)?;
            let start_year = if end.had_year {
                end.date.year()
            } else {
                reference_year
            };
            let mut start = parse_date(start, start_year)?;
            let mut end_date = end.date;

            if start.date > end_date {
                match (start.had_year, end.had_year) {
                    // Dec 30 - Jan 2
                    (false, false) => end_date = shift_year(end_date, 1, date_text)?,
                    // Dec 30 - Jan 2, 2025
                    (false, true) => start.date = shift_year(start.date, -1, date_text)?,
                    _ => {}
                }
            }

            Ok((start.date, end_date))
        }
        _ => Err(CityScoutError::date_parse(date_text, "no date found")),
    }
}

fn shift_year(date: NaiveDate, by: i32, input: &str) -> Result<NaiveDate> {
    date.with_year(date.year() + by)
        .ok_or_else(|| CityScoutError::date_parse(input, "date does not exist in adjacent year"))
}

fn clean(text: &str) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = LEADING_WEEKDAY.replace(&text, "");
    let text = ORDINAL.replace_all(&text, "$1");
    let text = SEPT.replace_all(&text, "Sep");
    text.replace('.', "").trim_end_matches(',').trim().to_string()
}
