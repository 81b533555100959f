//! The single request/response translation between a client query and the provider.

use std::sync::Arc;

use tracing::debug;

use crate::{
    Config, GatewayError, WeatherProvider, WeatherQuery, WeatherResult,
    provider::provider_from_config,
};

/// Validates queries and dispatches them to the configured provider.
///
/// Holds no per-request state; clone freely and share across tasks.
#[derive(Debug, Clone)]
pub struct WeatherGateway {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherGateway {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Build a gateway for the OpenWeather provider.
    ///
    /// This is the startup check for the credential: without an API key
    /// no gateway can be constructed.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let provider: Arc<dyn WeatherProvider> = provider_from_config(config)?.into();
        Ok(Self::new(provider))
    }

    /// Validate `raw_city`, query upstream once, and return the normalized result.
    pub async fn handle_weather_query(
        &self,
        raw_city: Option<&str>,
    ) -> Result<WeatherResult, GatewayError> {
        let query = WeatherQuery::parse(raw_city)?;
        debug!(city = %query.city(), "dispatching weather query");
        self.provider.current_conditions(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for CountingProvider {
        async fn current_conditions(
            &self,
            query: &WeatherQuery,
        ) -> Result<WeatherResult, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherResult {
                temperature: 16,
                humidity: 72,
                wind_speed: 19,
                description: "light rain".into(),
                city: query.city().to_string(),
                icon: "10d".into(),
                country: Some("GB".into()),
            })
        }
    }

    #[tokio::test]
    async fn blank_queries_never_reach_provider() {
        let provider = Arc::new(CountingProvider::default());
        let gateway = WeatherGateway::new(provider.clone());

        for raw in [None, Some(""), Some("   ")] {
            let err = gateway.handle_weather_query(raw).await.unwrap_err();
            assert!(matches!(err, GatewayError::InvalidQuery(_)));
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_query_calls_provider_once_with_trimmed_city() {
        let provider = Arc::new(CountingProvider::default());
        let gateway = WeatherGateway::new(provider.clone());

        let result = gateway.handle_weather_query(Some("  London  ")).await.unwrap();

        assert_eq!(result.city, "London");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn from_config_refuses_without_api_key() {
        let err = WeatherGateway::from_config(&Config::default()).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigurationMissing(_)));
    }
}
