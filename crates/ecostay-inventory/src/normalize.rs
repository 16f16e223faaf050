//! Mapping from the provider's nested hotel shape to [`RawListing`].

use ecostay_core::RawListing;

use crate::error::InventoryError;
use crate::types::{LooseNumber, ProviderHotel};

/// Normalizes one provider hotel. `index` is its position in the response and
/// only used for error reporting.
///
/// # Errors
///
/// Returns [`InventoryError::Normalization`] when the id or name is absent or
/// blank. Missing price, rating, review count, location or photo are tolerated.
pub fn normalize_hotel(hotel: ProviderHotel, index: usize) -> Result<RawListing, InventoryError> {
    let external_id = hotel
        .id
        .map(|id| id.to_string().trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| InventoryError::Normalization {
            index,
            reason: "hotel has no id".into(),
        })?;

    let name = hotel
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| InventoryError::Normalization {
            index,
            reason: format!("hotel {external_id} has no name"),
        })?;

    let address = hotel.location.and_then(|l| l.address_obj);
    let (city, region, country) = match address {
        Some(a) => (non_blank(a.city), non_blank(a.state), non_blank(a.country)),
        None => (None, None, None),
    };

    let image_url = hotel
        .photo
        .and_then(|p| p.images)
        .and_then(|i| i.large)
        .and_then(|l| l.url)
        .and_then(|u| non_blank(Some(u)));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let review_count = hotel
        .review_count
        .as_ref()
        .and_then(LooseNumber::as_f64)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round().min(f64::from(u32::MAX)) as u32);

    Ok(RawListing {
        external_id,
        name,
        city,
        region,
        country,
        price: hotel.price.as_ref().and_then(LooseNumber::as_f64),
        rating: hotel.rating.as_ref().and_then(LooseNumber::as_f64),
        review_count,
        image_url,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
