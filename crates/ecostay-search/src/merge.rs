//! Joins inventory listings against the certification registry.

use std::collections::{HashMap, HashSet};

use ecostay_core::{CanonicalHotel, CertificationRecord, RawListing};

/// Keeps only listings whose id is in `registry` and merges each into a
/// [`CanonicalHotel`], preserving the order of `listings`.
///
/// Certification level and description come from the registry; everything
/// else comes from the listing. Duplicate listing ids each produce a hotel.
/// If the registry itself repeats an id, the first record wins.
#[must_use]
pub fn merge(listings: Vec<RawListing>, registry: &[CertificationRecord]) -> Vec<CanonicalHotel> {
    let mut lookup: HashMap<&str, &CertificationRecord> = HashMap::with_capacity(registry.len());
    for record in registry {
        lookup.entry(record.id.as_str()).or_insert(record);
    }

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    let mut merged = Vec::new();

    for listing in listings {
        let Some(record) = lookup.get(listing.external_id.as_str()) else {
            continue;
        };
        if !seen.insert(listing.external_id.clone()) {
            duplicates.push(listing.external_id.clone());
        }
        merged.push(canonicalize(listing, record));
    }

    if !duplicates.is_empty() {
        tracing::warn!(
            ids = ?duplicates,
            "inventory returned duplicate certified hotel ids; emitting each occurrence"
        );
    }

    merged
}

fn canonicalize(listing: RawListing, record: &CertificationRecord) -> CanonicalHotel {
    let secondary_location = listing
        .region
        .or(listing.country)
        .unwrap_or_default();

    CanonicalHotel {
        id: listing.external_id,
        name: listing.name,
        primary_location: listing.city.unwrap_or_default(),
        secondary_location,
        certification: record.certification_level,
        description: record.description.clone(),
        price: listing.price,
        rating: listing.rating,
        review_count: listing.review_count.unwrap_or(0),
        image_url: listing.image_url,
        amenities: Vec::new(),
    }
}
