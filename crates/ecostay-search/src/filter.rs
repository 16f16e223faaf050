//! Post-merge filtering on certification, nightly price and amenities.

use ecostay_core::{CanonicalHotel, FilterCriteria};

/// Returns the subset of `hotels` that satisfies every predicate in
/// `criteria`, preserving order.
///
/// - Certifications: an empty set admits every level.
/// - Price: see [`ecostay_core::PriceRange::admits`].
/// - Amenities: a hotel with no amenity data is admitted; otherwise it must
///   carry every requested tag (case-insensitive).
#[must_use]
pub fn filter(hotels: Vec<CanonicalHotel>, criteria: &FilterCriteria) -> Vec<CanonicalHotel> {
    let requested: Vec<String> = criteria
        .amenities
        .iter()
        .map(|a| a.to_lowercase())
        .collect();

    hotels
        .into_iter()
        .filter(|hotel| matches(hotel, criteria, &requested))
        .collect()
}

fn matches(hotel: &CanonicalHotel, criteria: &FilterCriteria, requested: &[String]) -> bool {
    if !criteria.certifications.is_empty() && !criteria.certifications.contains(&hotel.certification)
    {
        return false;
    }

    if !criteria.price_range.admits(hotel.price) {
        return false;
    }

    if requested.is_empty() || hotel.amenities.is_empty() {
        return true;
    }

    requested.iter().all(|wanted| {
        hotel
            .amenities
            .iter()
            .any(|have| have.to_lowercase() == *wanted)
    })
}
