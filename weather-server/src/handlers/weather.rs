//! `GET /api/weather?q=<city>`

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use weather_core::{GatewayError, WeatherResult};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    pub q: Option<String>,
}

pub async fn get_weather(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<Json<WeatherResult>, ApiError> {
    let expose = state.expose_internal_errors;

    let Query(params) = params.map_err(|rejection| {
        ApiError::new(GatewayError::InvalidQuery(Some(rejection.body_text())), expose)
    })?;

    state
        .gateway
        .handle_weather_query(params.q.as_deref())
        .await
        .map(Json)
        .map_err(|e| ApiError::new(e, expose))
}
