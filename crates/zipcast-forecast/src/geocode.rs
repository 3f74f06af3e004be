//! Forward geocoding: convert a postal address to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use crate::types::{AddressQuery, Coordinate, GeocodeMatch, GeocodeResult, UpstreamError};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<CoordinateValue>,
    lon: Option<CoordinateValue>,
    display_name: Option<String>,
}

/// Nominatim reports coordinates as decimal strings; some mirrors send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordinateValue {
    Text(String),
    Number(f64),
}

impl CoordinateValue {
    fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Arc<Client>,
    base_url: String,
    language: String,
}

impl GeocodeClient {
    pub fn new(client: Arc<Client>, base_url: &str, language: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        }
    }

    /// Search for `query` and return the highest-ranked candidate.
    ///
    /// An empty candidate list is `GeocodeResult::NotFound`; transport and
    /// parse failures are `UpstreamError`.
    #[instrument(skip(self, query), fields(postal_code = %query.postal_code), level = "info")]
    pub async fn resolve(&self, query: &AddressQuery) -> Result<GeocodeResult, UpstreamError> {
        let url = format!("{}/search", self.base_url);
        let search = query.search_text();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", search.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("accept-language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Geocode returned status {}", response.status());
            return Err(UpstreamError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(format!("geocoder response: {}", e)))?;

        let Some(best) = places.into_iter().next() else {
            tracing::info!("Geocoder found no candidates");
            return Ok(GeocodeResult::NotFound);
        };

        let (Some(lat), Some(lon)) = (best.lat, best.lon) else {
            return Err(UpstreamError::Malformed(
                "geocoder candidate is missing lat/lon".to_string(),
            ));
        };

        let coordinate = Coordinate::parse(&lat.as_text(), &lon.as_text())
            .map_err(|e| UpstreamError::Malformed(format!("geocoder coordinate: {}", e)))?;

        tracing::info!("Geocoded to {}", coordinate);
        Ok(GeocodeResult::Found(GeocodeMatch {
            coordinate,
            display_name: best.display_name,
        }))
    }
}
