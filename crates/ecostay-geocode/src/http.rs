use ecostay_core::GeocodingProvider;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::GeocodeError;

/// Normalises `base_url` to end with exactly one slash so relative joins
/// append to the path rather than replacing its last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, GeocodeError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Sends the request, maps non-2xx statuses to typed errors, and parses the
/// JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    provider: GeocodingProvider,
    context: &str,
) -> Result<T, GeocodeError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(GeocodeError::Rejected {
            provider,
            status: status.as_u16(),
        });
    }

    if !status.is_success() {
        return Err(GeocodeError::UnexpectedStatus {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
