//! National Weather Service API: point lookup and forecast document.
//!
//! `/points/{lat},{lon}` returns `properties.forecast`, the URI of the
//! gridpoint forecast. Dereferencing it returns `properties.periods`, a
//! chronological list of named periods.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{Coordinate, ForecastPeriod, GridReference, UpstreamError};

pub const NWS_API_URL: &str = "https://api.weather.gov";
const GEO_JSON: &str = "application/geo+json";

/// Build the HTTP client shared by the geocoder and the forecast provider.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Arc<Client>, UpstreamError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;
    Ok(Arc::new(client))
}

#[derive(Debug, Deserialize)]
struct PointResponse {
    properties: Option<PointProperties>,
}

#[derive(Debug, Deserialize)]
struct PointProperties {
    forecast: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Option<Vec<ForecastPeriod>>,
}

/// Host name used in "unable to process" messages.
fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// Maps a coordinate to its forecast-document URI.
#[derive(Debug, Clone)]
pub struct GridResolver {
    client: Arc<Client>,
    base_url: String,
}

impl GridResolver {
    pub fn new(client: Arc<Client>, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[instrument(skip(self), fields(point = %coordinate), level = "info")]
    pub async fn locate(&self, coordinate: &Coordinate) -> Result<GridReference, UpstreamError> {
        let url = format!("{}/points/{}", self.base_url, coordinate.as_point());
        let host = host_of(&url);
        let unprocessable = || UpstreamError::Unprocessable(host.clone());

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, GEO_JSON)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Point lookup returned status {}", response.status());
            return Err(UpstreamError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        // A body that isn't the expected shape is treated like a missing field.
        let body: PointResponse = response.json().await.map_err(|e| {
            tracing::debug!("Point lookup parse error: {}", e);
            unprocessable()
        })?;

        let forecast = body
            .properties
            .and_then(|p| p.forecast)
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|uri| !uri.is_empty())
            .ok_or_else(unprocessable)?;

        tracing::debug!("Forecast document at {}", forecast);
        Ok(GridReference::new(forecast))
    }
}

/// Dereferences a forecast-document URI into its ordered period list.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Arc<Client>,
}

impl ForecastFetcher {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    #[instrument(skip(self), fields(uri = reference.as_str()), level = "info")]
    pub async fn fetch(&self, reference: &GridReference) -> Result<Vec<ForecastPeriod>, UpstreamError> {
        let url = reference.as_str();

        let response = self
            .client
            .get(url)
            .header(ACCEPT, GEO_JSON)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!("Forecast returned status {}", response.status());
            return Err(UpstreamError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(format!("forecast document: {}", e)))?;

        let periods = body
            .properties
            .and_then(|p| p.periods)
            .unwrap_or_default();

        if periods.is_empty() {
            return Err(UpstreamError::EmptyForecast);
        }

        tracing::debug!("Forecast has {} periods", periods.len());
        Ok(periods)
    }
}

/// Forecast for one coordinate, with the grid lookup performed at most once.
///
/// The grid reference is stored on first access and reused by every later
/// call on the same value.
#[derive(Debug)]
pub struct PointForecast<'a> {
    resolver: &'a GridResolver,
    coordinate: Coordinate,
    grid: Option<GridReference>,
}

impl<'a> PointForecast<'a> {
    pub fn new(resolver: &'a GridResolver, coordinate: Coordinate) -> Self {
        Self {
            resolver,
            coordinate,
            grid: None,
        }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub async fn grid_reference(&mut self) -> Result<&GridReference, UpstreamError> {
        let grid = match self.grid.take() {
            Some(grid) => grid,
            None => self.resolver.locate(&self.coordinate).await?,
        };
        Ok(&*self.grid.insert(grid))
    }

    pub async fn periods(&mut self, fetcher: &ForecastFetcher) -> Result<Vec<ForecastPeriod>, UpstreamError> {
        let grid = self.grid_reference().await?;
        fetcher.fetch(grid).await
    }
}
