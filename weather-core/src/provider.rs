use crate::{
    Config, GatewayError, WeatherQuery, WeatherResult, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions for a single city.
///
/// Implementations issue exactly one upstream request per call and never retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_conditions(&self, query: &WeatherQuery)
    -> Result<WeatherResult, GatewayError>;
}

/// Construct the OpenWeather provider from config.
///
/// Fails with `ConfigurationMissing` when no API key is configured.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, GatewayError> {
    let api_key = config.api_key()?.clone();

    let provider = OpenWeatherProvider::new(api_key, config.base_url.clone())?;
    Ok(Box::new(provider))
}
