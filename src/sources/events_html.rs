//! Scraped events listing source

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

use super::{EventSource, HttpClient, RawEventItem};
use crate::{CityScoutError, Result};

const ITEM_SELECTOR: &str = ".eventitem";
const CATEGORY_SELECTOR: &str = ".category .term";
const ANCHOR_SELECTOR: &str = "a";
const DATE_SELECTOR: &str = ".eventdate";

pub struct HtmlEventSource {
    http: HttpClient,
    url: String,
}

impl HtmlEventSource {
    #[must_use]
    pub fn new(http: HttpClient, url: String) -> Self {
        Self { http, url }
    }

    /// Extract event items from a listing page
    pub fn parse_items(html: &str) -> Result<Vec<RawEventItem>> {
        let document = Html::parse_document(html);
        let item = selector(ITEM_SELECTOR)?;
        let category = selector(CATEGORY_SELECTOR)?;
        let anchor = selector(ANCHOR_SELECTOR)?;
        let date = selector(DATE_SELECTOR)?;

        let items: Vec<RawEventItem> = document
            .select(&item)
            .map(|node| RawEventItem {
                categories: node.select(&category).map(text_of).collect(),
                anchor_text: node.select(&anchor).next().map(text_of),
                date_time: node.select(&date).next().map(text_of),
            })
            .collect();

        debug!("Found {} event items", items.len());
        Ok(items)
    }
}

impl EventSource for HtmlEventSource {
    #[instrument(skip(self), fields(url = %self.url))]
    fn fetch_items(&self) -> Result<Vec<RawEventItem>> {
        let response = self.http.get(&self.url, None)?;
        let html = response
            .text()
            .map_err(|e| CityScoutError::fetch(format!("Failed to read events page: {e}")))?;

        let items = Self::parse_items(&html)?;
        info!("Scraped {} event items", items.len());
        Ok(items)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| CityScoutError::malformed(format!("Invalid selector '{css}': {e}")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <div class="eventitem">
    <div class="category"><span class="term">Arts,</span><span class="term">Festivals</span></div>
    <h1><a href="/events/arts-festival">Three Rivers Arts Festival</a></h1>
    <div class="eventdate">
        June 1 - June 3	| 10am-5pm
    </div>
  </div>
  <div class="eventitem">
    <div class="category"><span class="term">Holiday</span></div>
    <h1><a href="/events/light-up-night">Light Up Night</a></h1>
    <div class="eventdate">November 22</div>
  </div>
  <div class="eventitem">
    <div class="eventdate">July 4</div>
  </div>
</body></html>"#;

    #[test]
    fn test_parse_items() {
        let items = HtmlEventSource::parse_items(PAGE).unwrap();
        assert_eq!(items.len(), 3);

        let first = &items[0];
        assert_eq!(first.categories, vec!["Arts,", "Festivals"]);
        assert_eq!(first.anchor_text.as_deref(), Some("Three Rivers Arts Festival"));
        assert!(first.date_time.as_deref().unwrap().contains("June 1 - June 3"));

        let second = &items[1];
        assert_eq!(second.categories, vec!["Holiday"]);
        assert_eq!(second.date_time.as_deref(), Some("November 22"));

        let third = &items[2];
        assert!(third.categories.is_empty());
        assert!(third.anchor_text.is_none());
    }

    #[test]
    fn test_page_without_items() {
        let items =
            HtmlEventSource::parse_items("<html><body><p>Nothing</p></body></html>").unwrap();
        assert!(items.is_empty());
    }
}
