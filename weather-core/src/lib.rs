//! Core library for the weather query gateway.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The gateway error taxonomy
//! - Query validation and the normalized result model
//! - The OpenWeather provider behind the `WeatherProvider` abstraction
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod provider;

pub use config::{ApiKey, Config, Environment};
pub use error::GatewayError;
pub use gateway::WeatherGateway;
pub use model::{WeatherQuery, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
