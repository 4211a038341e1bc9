//! Restaurant normalizer

use tracing::{error, info, warn};

use crate::config::MalformedPolicy;
use crate::models::{Dataset, RestaurantRecord};
use crate::sources::RawBusiness;
use crate::{CityScoutError, Result};

/// Derived cuisines that are not places to eat
pub const NON_FOOD_CUISINES: &[&str] = &[
    "Art Museums",
    "Museums",
    "Botanical Gardens",
    "Landmarks & Historical Buildings",
];

/// Normalize search results. Entries whose cuisine is in [`NON_FOOD_CUISINES`]
/// are dropped; malformed entries fail the batch or are skipped per `policy`.
pub fn normalize_restaurants(
    businesses: Vec<RawBusiness>,
    policy: MalformedPolicy,
) -> Result<Dataset<RestaurantRecord>> {
    let total = businesses.len();
    let mut records = Vec::with_capacity(total);
    let mut excluded = 0;
    let mut malformed = 0;

    for business in businesses {
        match to_record(business) {
            Ok(record) if is_non_food(&record.cuisine) => excluded += 1,
            Ok(record) => records.push(record),
            Err(e) => match policy {
                MalformedPolicy::Fail => {
                    error!("Aborting restaurant dataset: {}", e);
                    return Err(e);
                }
                MalformedPolicy::Skip => {
                    warn!("Skipping restaurant entry: {}", e);
                    malformed += 1;
                }
            },
        }
    }

    info!(
        "Normalized {} of {} restaurants ({} non-food, {} malformed)",
        records.len(),
        total,
        excluded,
        malformed
    );

    Ok(Dataset::new(records))
}

fn is_non_food(cuisine: &str) -> bool {
    NON_FOOD_CUISINES.contains(&cuisine)
}

fn to_record(business: RawBusiness) -> Result<RestaurantRecord> {
    // The first listed category is authoritative
    let cuisine = business
        .categories
        .first()
        .map(|c| c.title.clone())
        .ok_or_else(|| {
            CityScoutError::malformed(format!("'{}' has no category tags", business.name))
        })?;

    let (Some(latitude), Some(longitude)) =
        (business.coordinates.latitude, business.coordinates.longitude)
    else {
        return Err(CityScoutError::malformed(format!(
            "'{}' has no coordinates",
            business.name
        )));
    };

    Ok(RestaurantRecord {
        name: business.name,
        is_closed: business.is_closed,
        review_count: business.review_count,
        cuisine,
        rating: business.rating,
        price: business.price,
        address: business.location.display_address,
        latitude,
        longitude,
    })
}
