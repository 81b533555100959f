use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// A validated request for current conditions in one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    /// Validate the raw `q` parameter. The stored city is trimmed.
    pub fn parse(raw: Option<&str>) -> Result<Self, GatewayError> {
        let city = raw.map(str::trim).unwrap_or_default();

        if city.is_empty() {
            return Err(GatewayError::InvalidQuery(Some("city is required".to_string())));
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Normalized current-conditions summary returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    /// Degrees Celsius, rounded.
    pub temperature: i64,
    /// Relative humidity in percent, as reported upstream.
    pub humidity: i64,
    /// Kilometres per hour, rounded.
    pub wind_speed: i64,
    pub description: String,
    pub city: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Round half-up, matching how existing clients round (`-2.5` becomes `-2`).
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Convert metres per second to kilometres per hour.
pub fn mps_to_kmh(speed_mps: f64) -> f64 {
    speed_mps * 3.6
}
