//! Inventory provider response types.
//!
//! These mirror the provider's hotel search payload. Every field other than
//! the envelope is optional here so that a single sparse hotel produces a
//! precise [`crate::InventoryError::Normalization`] instead of an opaque
//! deserialization failure for the whole page.

use serde::Deserialize;

/// `{ "hotels": [ ... ] }`. A missing or `null` `hotels` key means zero results.
#[derive(Debug, Deserialize)]
pub struct HotelSearchResponse {
    #[serde(default)]
    pub hotels: Option<Vec<ProviderHotel>>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderHotel {
    #[serde(default)]
    pub id: Option<ProviderId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<ProviderLocation>,
    #[serde(default)]
    pub price: Option<LooseNumber>,
    #[serde(default)]
    pub rating: Option<LooseNumber>,
    #[serde(default)]
    pub review_count: Option<LooseNumber>,
    #[serde(default)]
    pub photo: Option<Photo>,
}

/// Hotel ids arrive as either JSON strings or integers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProviderId {
    Text(String),
    Integer(i64),
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderId::Text(s) => f.write_str(s),
            ProviderId::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// A number that may be encoded as a JSON number or a numeric string
/// (e.g. `"289"`, `"$289.00"`, `"4.5"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(*n).filter(|n| n.is_finite()),
            LooseNumber::Text(s) => s
                .trim()
                .trim_start_matches('$')
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderLocation {
    #[serde(default)]
    pub address_obj: Option<AddressObj>,
}

#[derive(Debug, Deserialize)]
pub struct AddressObj {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    #[serde(default)]
    pub images: Option<PhotoImages>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoImages {
    #[serde(default)]
    pub large: Option<PhotoImage>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoImage {
    #[serde(default)]
    pub url: Option<String>,
}
