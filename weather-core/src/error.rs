use thiserror::Error;

/// Every way a single weather query can end without a result.
///
/// The HTTP layer maps each variant to a status code; see `weather-server`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The city parameter was missing or blank. No upstream call was made.
    #[error("invalid query: {}", .0.as_deref().unwrap_or("city is required"))]
    InvalidQuery(Option<String>),

    /// Upstream answered 404 for the requested city.
    #[error("city not found: {}", .0.as_deref().unwrap_or("no details"))]
    CityNotFound(Option<String>),

    /// Upstream was reachable but answered with a non-2xx, non-404 status.
    #[error("upstream unavailable (status {status}): {}", .message.as_deref().unwrap_or("no details"))]
    UpstreamUnavailable { status: u16, message: Option<String> },

    /// Transport failure, or a response body that did not match the expected shape.
    #[error("upstream unreachable: {}", .0.as_deref().unwrap_or("no details"))]
    UpstreamUnreachable(Option<String>),

    /// No API key was configured for the upstream provider.
    #[error("configuration missing: {}", .0.as_deref().unwrap_or("no details"))]
    ConfigurationMissing(Option<String>),
}

impl GatewayError {
    /// Stable machine-readable code, used in HTTP error bodies and logs.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::InvalidQuery(_) => "invalid_query",
            GatewayError::CityNotFound(_) => "city_not_found",
            GatewayError::UpstreamUnavailable { .. } => "upstream_unavailable",
            GatewayError::UpstreamUnreachable(_) => "upstream_unreachable",
            GatewayError::ConfigurationMissing(_) => "configuration_missing",
        }
    }

    /// The human-readable message carried by the error, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            GatewayError::InvalidQuery(m)
            | GatewayError::CityNotFound(m)
            | GatewayError::UpstreamUnreachable(m)
            | GatewayError::ConfigurationMissing(m) => m.as_deref(),
            GatewayError::UpstreamUnavailable { message, .. } => message.as_deref(),
        }
    }
}
