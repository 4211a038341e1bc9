//! Data models for the `CityScout` application
//!
//! This module contains the normalized record schemas, one per domain:
//! - Restaurant: businesses from the search API
//! - Art: public art installations from the CSV export
//! - Event: listings scraped from the events page
//!
//! plus the read-only [`Dataset`] container the query loop works on.

pub mod art;
pub mod dataset;
pub mod event;
pub mod restaurant;

pub use art::{ArtRecord, Coordinate, NOT_AVAILABLE};
pub use dataset::Dataset;
pub use event::{EventRecord, TIMINGS_UNAVAILABLE};
pub use restaurant::RestaurantRecord;
