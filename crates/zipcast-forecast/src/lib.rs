//! Address-to-forecast resolution for zipcast
//!
//! Geocodes a postal address via Nominatim, locates the matching grid cell on
//! the National Weather Service API, picks the current forecast period and
//! caches the reading per postal code for a bounded validity window.

pub mod types;
pub mod cache;
pub mod geocode;
pub mod period;
pub mod pipeline;
pub mod provider;

pub use types::*;
pub use cache::{CacheEntry, ForecastCache};
pub use geocode::GeocodeClient;
pub use period::select_current;
pub use pipeline::{PipelineSettings, ResolutionPipeline};
pub use provider::{build_http_client, ForecastFetcher, GridResolver, PointForecast};
