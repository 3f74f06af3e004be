use serde::{Deserialize, Serialize};

/// Free-text postal address, as handed over by the boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl AddressQuery {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
        }
    }

    /// Geocoder search text: street, city, state, postal code joined by spaces.
    pub fn search_text(&self) -> String {
        [
            self.street.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.postal_code.as_str(),
        ]
        .join(" ")
    }

    /// Cache key for this address (the postal code, verbatim).
    pub fn cache_key(&self) -> &str {
        &self.postal_code
    }
}

/// Number of fractional digits kept for coordinates.
pub const COORDINATE_PRECISION: i32 = 4;

/// Latitude/longitude pair rounded to four fractional digits.
///
/// Construction fails when either value is absent or not finite, so a
/// `Coordinate` in hand is always usable for a grid lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        Ok(Self {
            latitude: round_point("latitude", latitude)?,
            longitude: round_point("longitude", longitude)?,
        })
    }

    /// Parse a coordinate from decimal strings (the geocoder's wire format).
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        let latitude = parse_point("latitude", latitude)?;
        let longitude = parse_point("longitude", longitude)?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `"<lat>,<lon>"` with exactly four fractional digits each.
    pub fn as_point(&self) -> String {
        format!("{:.4},{:.4}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_point())
    }
}

fn parse_point(field: &'static str, raw: &str) -> Result<f64, CoordinateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoordinateError::Missing);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| CoordinateError::Invalid {
            field,
            value: trimmed.to_string(),
        })
}

fn round_point(field: &'static str, value: f64) -> Result<f64, CoordinateError> {
    if !value.is_finite() {
        return Err(CoordinateError::NotFinite { field });
    }
    let scale = 10f64.powi(COORDINATE_PRECISION);
    Ok((value * scale).round() / scale)
}

/// Outcome of a geocoding search. "Not found" is a normal answer, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResult {
    Found(GeocodeMatch),
    NotFound,
}

/// Best-ranked geocoder candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
}

/// Forecast-document URI returned by the point lookup. Never decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridReference(String);

impl GridReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Temperature unit as reported by the forecast provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "F")]
    Fahrenheit,
    #[serde(rename = "C")]
    Celsius,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "F",
            Self::Celsius => "C",
        }
    }
}

/// A named forecast span ("Today", "Tonight", ...). Kept in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub name: String,
    #[serde(default)]
    pub is_daytime: bool,
    pub temperature: i64,
    pub temperature_unit: TemperatureUnit,
    #[serde(default)]
    pub detailed_forecast: Option<String>,
}

/// The cached, caller-facing reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentReading {
    /// Formatted as `"<value>°<unit>"`, e.g. `"22°F"`
    pub temperature: String,
    pub detailed_forecast: Option<String>,
}

impl CurrentReading {
    pub fn from_period(period: &ForecastPeriod) -> Self {
        Self {
            temperature: format_temperature(period.temperature, period.temperature_unit),
            detailed_forecast: period.detailed_forecast.clone(),
        }
    }
}

pub fn format_temperature(value: i64, unit: TemperatureUnit) -> String {
    format!("{}°{}", value, unit.symbol())
}

/// Coordinate construction errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("The lat and lon arguments are required.")]
    Missing,
    #[error("Invalid {field}: {value}")]
    Invalid { field: &'static str, value: String },
    #[error("The {field} must be a finite number.")]
    NotFinite { field: &'static str },
}

/// Failures talking to (or interpreting) either upstream provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    #[error("The upstream request timed out.")]
    Timeout,
    #[error("Upstream request failed: {0}")]
    Transport(String),
    #[error("Upstream returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Malformed upstream response: {0}")]
    Malformed(String),
    #[error("Unable to process the request to {0}.")]
    Unprocessable(String),
    #[error("Unable to find the current temperature.")]
    EmptyForecast,
    #[error("Unable to find the current temperature.")]
    NoCurrentPeriod,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Malformed(e.to_string())
        } else {
            UpstreamError::Transport(e.to_string())
        }
    }
}

/// Result surface of a full resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("The provided address could not be found.")]
    AddressNotFound,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
