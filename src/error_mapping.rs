//! Maps forecast-crate errors onto the application's lookup outcomes.

use zipcast_core::LookupError;
use zipcast_forecast::{ResolveError, UpstreamError};

/// Extension trait for converting forecast errors to `LookupError`.
pub trait IntoLookupError {
    fn into_lookup_error(self) -> LookupError;
}

impl IntoLookupError for ResolveError {
    fn into_lookup_error(self) -> LookupError {
        match self {
            ResolveError::AddressNotFound => LookupError::AddressNotFound,
            ResolveError::Upstream(e) => e.into_lookup_error(),
        }
    }
}

impl IntoLookupError for UpstreamError {
    fn into_lookup_error(self) -> LookupError {
        LookupError::Upstream(self.to_string())
    }
}
