//! Reverse geocoding: convert coordinates to an administrative place name.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::resolve::PlaceCandidate;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "stylecast/0.1 (https://github.com/stylecast)";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    county: Option<String>,
    #[serde(rename = "state_district")]
    state_district: Option<String>,
    state: Option<String>,
}

/// Reverse geocode coordinates into the two administrative fields the
/// resolver cares about. Returns `None` on any failure so the previously
/// resolved name stays in effect; errors are logged, never surfaced.
pub async fn reverse_geocode(lat: f64, lon: f64) -> Option<PlaceCandidate> {
    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to create geocoding client: {}", e);
            return None;
        }
    };

    let url = format!(
        "{NOMINATIM_URL}?lat={lat}&lon={lon}&format=json&addressdetails=1&layer=address&zoom=10"
    );

    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            debug!("Reverse geocode request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        debug!("Reverse geocode returned status {}", response.status());
        return None;
    }

    let body: NominatimResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            debug!("Reverse geocode parse error: {}", e);
            return None;
        }
    };

    let addr = body.address?;

    // county/state_district map to the district level, state to the province.
    // City-block-level fields are ignored; they name places nobody searches for.
    let candidate = PlaceCandidate {
        sub_administrative_area: addr.county.or(addr.state_district),
        administrative_area: addr.state,
    };

    debug!(?candidate, "reverse geocoded");
    Some(candidate)
}
