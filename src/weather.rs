//! Weather API client for WeatherAPI.com integration
//!
//! Fetches the current Celsius reading for a locality.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use crate::error::{CepWeatherError, WeatherError};
use crate::models::Locality;

/// Source of current temperature readings
#[async_trait]
pub trait TemperatureFetcher: Send + Sync {
    /// Current temperature at `locality`, in Celsius
    async fn fetch(&self, locality: &Locality) -> Result<f64, WeatherError>;
}

/// WeatherAPI.com HTTP client
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// `current.json` response; only the fields we read
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub current: CurrentData,
}

#[derive(Debug, Deserialize)]
pub struct CurrentData {
    pub temp_c: f64,
}

impl WeatherApiClient {
    /// Create a new weather API client
    ///
    /// An absent key is sent as an empty `key` parameter and left to the
    /// provider to reject.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CepWeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CepWeatherError::http_client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.unwrap_or_default(),
        })
    }

    fn current_url(&self, locality: &Locality) -> String {
        format!(
            "{}/current.json?key={}&q={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&locality.to_query())
        )
    }
}

#[async_trait]
impl TemperatureFetcher for WeatherApiClient {
    #[instrument(skip(self), fields(locality = %locality))]
    async fn fetch(&self, locality: &Locality) -> Result<f64, WeatherError> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.current_url(locality))
            .send()
            .await
            .map_err(|e| {
                warn!("Weather API request failed: {}", e);
                WeatherError::Unavailable(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather API returned status {}", status);
            return Err(WeatherError::Unavailable(format!("status {status}")));
        }

        let body: CurrentWeatherResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse weather response: {}", e);
            WeatherError::Unavailable(format!("invalid response: {e}"))
        })?;

        debug!(
            "Current temperature {}°C retrieved in {:.3}s",
            body.current.temp_c,
            start_time.elapsed().as_secs_f64()
        );

        Ok(body.current.temp_c)
    }
}
