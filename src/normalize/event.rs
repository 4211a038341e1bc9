//! Event normalizer

use tracing::{info, warn};

use super::dates::{parse_range, split_date_time};
use crate::models::{Dataset, EventRecord};
use crate::sources::RawEventItem;
use crate::{CityScoutError, Result};

/// Normalize scraped event items. Items that are malformed or carry an
/// unreadable date are logged and skipped; the batch never fails.
#[must_use]
pub fn normalize_events(items: Vec<RawEventItem>, reference_year: i32) -> Dataset<EventRecord> {
    let total = items.len();
    let mut records = Vec::with_capacity(total);
    let mut skipped = 0;

    for (index, item) in items.into_iter().enumerate() {
        match to_record(item, reference_year) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping event item {}: {}", index + 1, e);
                skipped += 1;
            }
        }
    }

    info!(
        "Normalized {} of {} events ({} skipped)",
        records.len(),
        total,
        skipped
    );

    Dataset::new(records)
}

/// Trim each tag and strip surrounding commas, dropping tags left blank
#[must_use]
pub fn clean_categories(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|c| c.trim().trim_matches(',').trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

fn to_record(item: RawEventItem, reference_year: i32) -> Result<EventRecord> {
    let event_name = item
        .anchor_text
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CityScoutError::malformed("event item has no name"))?
        .to_string();

    let categories = clean_categories(&item.categories);

    let blob = item.date_time.as_deref().ok_or_else(|| {
        CityScoutError::malformed(format!("event '{event_name}' has no date"))
    })?;
    let (date_text, time_description) = split_date_time(blob);
    let (start_date, end_date) = parse_range(&date_text, reference_year)?;

    EventRecord::new(
        event_name,
        categories,
        start_date,
        end_date,
        time_description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TIMINGS_UNAVAILABLE;
    use chrono::NaiveDate;

    fn item(name: Option<&str>, categories: &[&str], date_time: Option<&str>) -> RawEventItem {
        RawEventItem {
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
            anchor_text: name.map(str::to_string),
            date_time: date_time.map(str::to_string),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_with_time() {
        let dataset = normalize_events(
            vec![item(
                Some("Three Rivers Arts Festival"),
                &["Arts,", "Festivals"],
                Some("June 1 - June 3 | 10am-5pm"),
            )],
            2024,
        );

        let event = &dataset.records()[0];
        assert_eq!(event.event_name(), "Three Rivers Arts Festival");
        assert_eq!(event.categories(), ["Arts", "Festivals"]);
        assert_eq!(event.start_date(), date(2024, 6, 1));
        assert_eq!(event.end_date(), date(2024, 6, 3));
        assert_eq!(event.time_description(), "10am-5pm");
    }

    #[test]
    fn test_single_date_without_time() {
        let dataset = normalize_events(
            vec![item(Some("Picklesburgh"), &["Food"], Some("June 1"))],
            2024,
        );

        let event = &dataset.records()[0];
        assert_eq!(event.start_date(), date(2024, 6, 1));
        assert_eq!(event.end_date(), event.start_date());
        assert_eq!(event.time_description(), TIMINGS_UNAVAILABLE);
    }

    #[test]
    fn test_day_only_ranges_keep_reference_year() {
        let items = ["June 1-3 | 10am", "Oct 10-12", "Dec 30-31"]
            .iter()
            .map(|b| item(Some("Market"), &["Food"], Some(*b)))
            .collect();
        let dataset = normalize_events(items, 2024);

        let ranges: Vec<(NaiveDate, NaiveDate)> = dataset
            .records()
            .iter()
            .map(|e| (e.start_date(), e.end_date()))
            .collect();
        assert_eq!(
            ranges,
            vec![
                (date(2024, 6, 1), date(2024, 6, 3)),
                (date(2024, 10, 10), date(2024, 10, 12)),
                (date(2024, 12, 30), date(2024, 12, 31)),
            ]
        );
        assert_eq!(dataset.records()[0].time_description(), "10am");
    }

    #[test]
    fn test_duplicate_categories_are_kept() {
        let raw = vec![" Music, ".to_string(), "Music".to_string(), ",".to_string()];
        assert_eq!(clean_categories(&raw), vec!["Music", "Music"]);
    }

    #[test]
    fn test_bad_items_are_skipped_not_fatal() {
        let dataset = normalize_events(
            vec![
                item(Some("Unparseable"), &["Misc"], Some("Sometime soon")),
                item(None, &["Misc"], Some("June 2")),
                item(Some("No Category"), &[","], Some("June 2")),
                item(Some("No Date"), &["Misc"], None),
                item(Some("Backwards"), &["Misc"], Some("2024-06-03 - 2024-06-01")),
                item(Some("Fine"), &["Misc"], Some("June 2")),
            ],
            2024,
        );

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].event_name(), "Fine");
    }

    #[test]
    fn test_start_never_after_end() {
        let blobs = [
            "June 1",
            "June 1 - June 3",
            "Dec 30 - Jan 2",
            "June 1-3",
            "2024-06-03 - 2024-06-01",
            "Sat, Nov 22nd | 5pm",
        ];
        let items = blobs.iter().map(|b| item(Some("E"), &["C"], Some(*b))).collect();
        let dataset = normalize_events(items, 2024);

        assert_eq!(dataset.len(), 5);
        assert!(dataset.records().iter().all(|e| e.start_date() <= e.end_date()));
    }
}
