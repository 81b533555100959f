//! Application state shared across handlers

use weather_core::{Environment, WeatherGateway};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gateway holding the provider and its credential
    pub gateway: WeatherGateway,
    /// Include internal error detail in error bodies
    pub expose_internal_errors: bool,
}

impl AppState {
    pub fn new(gateway: WeatherGateway, environment: Environment) -> Self {
        Self {
            gateway,
            expose_internal_errors: environment.is_development(),
        }
    }
}
