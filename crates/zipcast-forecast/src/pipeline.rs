//! Address → reading resolution: cache lookup, then geocode, grid lookup,
//! forecast fetch and period selection on a miss.

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::cache::ForecastCache;
use crate::geocode::{GeocodeClient, DEFAULT_LANGUAGE, NOMINATIM_URL};
use crate::period::select_current;
use crate::provider::{build_http_client, ForecastFetcher, GridResolver, PointForecast, NWS_API_URL};
use crate::types::{AddressQuery, CurrentReading, GeocodeResult, ResolveError, UpstreamError};

/// Endpoints and HTTP settings for the upstream providers.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub geocoder_url: String,
    pub language: String,
    pub forecast_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            geocoder_url: NOMINATIM_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            forecast_url: NWS_API_URL.to_string(),
            user_agent: concat!("zipcast/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct ResolutionPipeline {
    geocoder: GeocodeClient,
    grid: GridResolver,
    fetcher: ForecastFetcher,
    cache: Arc<ForecastCache>,
}

impl ResolutionPipeline {
    pub fn new(
        geocoder: GeocodeClient,
        grid: GridResolver,
        fetcher: ForecastFetcher,
        cache: Arc<ForecastCache>,
    ) -> Self {
        Self {
            geocoder,
            grid,
            fetcher,
            cache,
        }
    }

    /// Build all three upstream clients over one shared HTTP client.
    pub fn from_settings(
        settings: &PipelineSettings,
        cache: Arc<ForecastCache>,
    ) -> Result<Self, UpstreamError> {
        let client = build_http_client(&settings.user_agent, settings.timeout)?;

        Ok(Self::new(
            GeocodeClient::new(Arc::clone(&client), &settings.geocoder_url, &settings.language),
            GridResolver::new(Arc::clone(&client), &settings.forecast_url),
            ForecastFetcher::new(client),
            cache,
        ))
    }

    pub fn cache(&self) -> &ForecastCache {
        &self.cache
    }

    /// Resolve `query` to its current reading.
    ///
    /// A fresh cache entry for the postal code is returned without any
    /// upstream call. On a miss the reading is computed and stored; nothing is
    /// written to the cache unless every step succeeds.
    ///
    /// # Errors
    /// `ResolveError::AddressNotFound` when the geocoder has no candidates,
    /// `ResolveError::Upstream` for any provider failure.
    #[instrument(skip(self, query), fields(postal_code = %query.postal_code), level = "info")]
    pub async fn resolve(&self, query: &AddressQuery) -> Result<CurrentReading, ResolveError> {
        let key = query.cache_key();

        if let Some(entry) = self.cache.get(key) {
            return Ok(entry.value);
        }

        let reading = match self.compute(query).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!("Resolution failed: {}", e);
                return Err(e);
            }
        };

        self.cache.put(key, reading.clone());
        tracing::info!("Resolved current temperature {}", reading.temperature);
        Ok(reading)
    }

    async fn compute(&self, query: &AddressQuery) -> Result<CurrentReading, ResolveError> {
        let found = match self.geocoder.resolve(query).await? {
            GeocodeResult::Found(found) => found,
            GeocodeResult::NotFound => return Err(ResolveError::AddressNotFound),
        };

        let mut point = PointForecast::new(&self.grid, found.coordinate);
        let periods = point.periods(&self.fetcher).await?;

        let current = select_current(&periods).ok_or(UpstreamError::NoCurrentPeriod)?;
        Ok(CurrentReading::from_period(current))
    }
}
