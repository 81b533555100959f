use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    config::ApiKey,
    error::GatewayError,
    model::{WeatherQuery, WeatherResult, mps_to_kmh, round_half_up},
};

use super::WeatherProvider;

const USER_AGENT: &str = concat!("weather-gateway/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: ApiKey,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: ApiKey, base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = Client::builder().user_agent(USER_AGENT).build().map_err(|e| {
            GatewayError::UpstreamUnreachable(Some(format!("Failed to build HTTP client: {e}")))
        })?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn current_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: Option<OwSys>,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorResponse {
    message: Option<String>,
}

impl OwCurrentResponse {
    fn normalize(self) -> Result<WeatherResult, GatewayError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            GatewayError::UpstreamUnreachable(Some(
                "OpenWeather response contained no weather conditions".to_string(),
            ))
        })?;

        Ok(WeatherResult {
            temperature: round_half_up(self.main.temp),
            humidity: self.main.humidity,
            wind_speed: round_half_up(mps_to_kmh(self.wind.speed)),
            description: condition.description,
            city: self.name,
            icon: condition.icon,
            country: self.sys.and_then(|s| s.country).filter(|c| !c.is_empty()),
        })
    }
}

fn parse_current(body: &str) -> Result<WeatherResult, GatewayError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::UpstreamUnreachable(Some(format!(
            "Failed to parse OpenWeather current JSON: {e}"
        )))
    })?;

    parsed.normalize()
}

fn upstream_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, query), fields(city = %query.city()))]
    async fn current_conditions(
        &self,
        query: &WeatherQuery,
    ) -> Result<WeatherResult, GatewayError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[
                ("q", query.city()),
                ("appid", self.api_key.expose()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                let e = e.without_url();
                warn!(error = %e, "OpenWeather request failed");
                GatewayError::UpstreamUnreachable(Some(format!(
                    "Failed to send request to OpenWeather: {e}"
                )))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            GatewayError::UpstreamUnreachable(Some(format!(
                "Failed to read OpenWeather response body: {}",
                e.without_url()
            )))
        })?;

        if status == StatusCode::NOT_FOUND {
            debug!("OpenWeather reported unknown city");
            return Err(GatewayError::CityNotFound(upstream_message(&body)));
        }

        if !status.is_success() {
            warn!(status = %status, body = %truncate_body(&body), "OpenWeather returned an error");
            return Err(GatewayError::UpstreamUnavailable {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        let result = parse_current(&body)?;
        debug!(temperature = result.temperature, "OpenWeather conditions normalized");
        Ok(result)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 15.6, "feels_like": 15.1, "humidity": 72, "pressure": 1012},
        "wind": {"speed": 5.2, "deg": 240},
        "sys": {"country": "GB", "sunrise": 1700000000, "sunset": 1700030000},
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn normalizes_full_payload() {
        let result = parse_current(LONDON).expect("payload should normalize");

        assert_eq!(
            result,
            WeatherResult {
                temperature: 16,
                humidity: 72,
                wind_speed: 19,
                description: "light rain".into(),
                city: "London".into(),
                icon: "10d".into(),
                country: Some("GB".into()),
            }
        );
    }

    #[test]
    fn country_is_optional() {
        let body = r#"{
            "weather": [{"description": "clear sky", "icon": "01n"}],
            "main": {"temp": -0.4, "humidity": 90},
            "wind": {"speed": 0.0},
            "name": "Nowhere"
        }"#;

        let result = parse_current(body).unwrap();
        assert_eq!(result.country, None);
        assert_eq!(result.temperature, 0);
        assert_eq!(result.wind_speed, 0);
    }

    #[test]
    fn empty_weather_list_is_unreachable() {
        let body = r#"{
            "weather": [],
            "main": {"temp": 10.0, "humidity": 50},
            "wind": {"speed": 1.0},
            "name": "Paris"
        }"#;

        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamUnreachable(_)));
    }

    #[test]
    fn missing_field_is_unreachable() {
        let body = r#"{"weather": [{"description": "x", "icon": "y"}], "name": "Paris"}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamUnreachable(_)));

        let err = parse_current("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamUnreachable(_)));
    }

    #[test]
    fn upstream_message_extraction() {
        assert_eq!(
            upstream_message(r#"{"cod":"404","message":"city not found"}"#),
            Some("city not found".to_string())
        );
        assert_eq!(upstream_message(r#"{"cod":"500"}"#), None);
        assert_eq!(upstream_message("not json"), None);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let key = ApiKey::new("KEY").unwrap();
        let provider = OpenWeatherProvider::new(key, "http://localhost:1234/").unwrap();
        assert_eq!(provider.current_url(), "http://localhost:1234/weather");
    }
}
