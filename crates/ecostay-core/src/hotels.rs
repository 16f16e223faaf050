//! Hotel records as they move through a search: provider-native listings,
//! registry certifications, and the merged caller-facing shape.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A resolved destination. Produced once per search by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Internal trust rating assigned by the certification registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificationLevel {
    Gold,
    Silver,
    #[serde(rename = "Verified Green", alias = "VerifiedGreen")]
    VerifiedGreen,
}

impl CertificationLevel {
    /// The label stored in the registry and sent to clients.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CertificationLevel::Gold => "Gold",
            CertificationLevel::Silver => "Silver",
            CertificationLevel::VerifiedGreen => "Verified Green",
        }
    }
}

impl std::fmt::Display for CertificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificationLevel {
    type Err = String;

    /// Accepts the display label as well as snake, kebab and squashed spellings,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squashed: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match squashed.as_str() {
            "gold" => Ok(CertificationLevel::Gold),
            "silver" => Ok(CertificationLevel::Silver),
            "verifiedgreen" => Ok(CertificationLevel::VerifiedGreen),
            _ => Err(format!("unknown certification level '{s}'")),
        }
    }
}

/// A hotel as reported by the inventory provider, already lifted out of the
/// provider's nested response schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub external_id: String,
    pub name: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub image_url: Option<String>,
}

/// One entry of the certified-hotel registry. `id` shares the inventory
/// provider's id space and is the merge join key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationRecord {
    pub id: String,
    #[serde(rename = "cert_level", alias = "certification_level")]
    pub certification_level: CertificationLevel,
    #[serde(default)]
    pub description: String,
}

/// The merged record exposed to callers. Only ever built for a listing whose
/// id is present in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHotel {
    pub id: String,
    pub name: String,
    pub primary_location: String,
    pub secondary_location: String,
    pub certification: CertificationLevel,
    pub description: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Amenity tags. No current data source populates these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
}
