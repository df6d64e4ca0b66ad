//! HTTP API for temperature lookups
//!
//! Serves `/temperatura/{cep}`: validates the CEP, resolves its locality,
//! fetches the current temperature and answers in three units.

use std::borrow::Cow;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{Method, Uri},
    response::Json,
    routing::any,
};
use tracing::{debug, instrument};

use crate::{
    config::AppConfig,
    error::{ApiError, CepWeatherError},
    location_resolver::{LocalityResolver, ViaCepResolver},
    models::{PostalCode, TemperatureResponse},
    weather::{TemperatureFetcher, WeatherApiClient},
};

/// Everything after this prefix is the raw postal code.
pub const ROUTE_PREFIX: &str = "/temperatura/";

/// Shared handler state. Holds only immutable clients.
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<dyn LocalityResolver>,
    fetcher: Arc<dyn TemperatureFetcher>,
}

impl AppState {
    pub fn new(resolver: Arc<dyn LocalityResolver>, fetcher: Arc<dyn TemperatureFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Build the ViaCEP and WeatherAPI clients from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, CepWeatherError> {
        let resolver = ViaCepResolver::new(&config.viacep_base_url, config.http_timeout())?;
        let fetcher = WeatherApiClient::new(
            &config.weather_base_url,
            config.weather_api_key.clone(),
            config.http_timeout(),
        )?;
        Ok(Self::new(Arc::new(resolver), Arc::new(fetcher)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ROUTE_PREFIX, any(get_temperature))
        .route("/temperatura/{*code}", any(get_temperature))
        .with_state(state)
}

#[instrument(skip_all, fields(method = %method, path = %uri.path()))]
async fn get_temperature(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Json<TemperatureResponse>, ApiError> {
    if method != Method::GET {
        return Err(ApiError::MethodNotAllowed);
    }

    let raw = raw_postal_code(uri.path());
    let code = PostalCode::parse(&raw).ok_or(ApiError::InvalidPostalCode)?;

    let locality = state.resolver.resolve(&code).await?;
    let celsius = state.fetcher.fetch(&locality).await?;

    debug!("{} -> {} at {}°C", code, locality, celsius);
    Ok(Json(TemperatureResponse::from_celsius(celsius)))
}

fn raw_postal_code(path: &str) -> Cow<'_, str> {
    let raw = path.strip_prefix(ROUTE_PREFIX).unwrap_or_default();
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
