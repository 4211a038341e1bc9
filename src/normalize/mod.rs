//! Record normalizers
//!
//! Turn one raw source payload into a [`Dataset`](crate::models::Dataset) of
//! uniform records:
//! - [`restaurant`]: first category wins as cuisine, non-food entries dropped
//! - [`art`]: absent cells become the "Not Available" sentinel, unplaceable rows dropped
//! - [`event`]: categories cleaned, date/time blob split and parsed

pub mod art;
pub mod dates;
pub mod event;
pub mod restaurant;

pub use art::normalize_art;
pub use event::normalize_events;
pub use restaurant::normalize_restaurants;
