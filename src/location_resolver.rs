//! Locality Resolution Module
//!
//! Resolves a validated postal code into a `Locality` through the ViaCEP
//! address lookup service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::{CepWeatherError, LookupError};
use crate::models::{Locality, PostalCode};

/// Resolves postal codes into localities
#[async_trait]
pub trait LocalityResolver: Send + Sync {
    async fn resolve(&self, code: &PostalCode) -> Result<Locality, LookupError>;
}

/// ViaCEP HTTP client
#[derive(Debug, Clone)]
pub struct ViaCepResolver {
    client: Client,
    base_url: String,
}

/// ViaCEP lookup response. Missing fields decode as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViaCepResponse {
    pub cep: String,
    pub localidade: String,
    pub uf: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub erro: bool,
}

// ViaCEP has shipped `"erro": true` and `"erro": "true"`.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => text.eq_ignore_ascii_case("true"),
    })
}

impl ViaCepResponse {
    /// Turn a decoded lookup body into a locality
    pub fn into_locality(self, code: &PostalCode) -> Result<Locality, LookupError> {
        if self.erro || self.localidade.is_empty() {
            return Err(LookupError::NotFound(code.to_string()));
        }
        Ok(Locality::new(self.localidade, self.uf))
    }
}

impl ViaCepResolver {
    /// Create a new client against `base_url` (e.g. `https://viacep.com.br`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CepWeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CepWeatherError::http_client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self, code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, code.as_str())
    }
}

#[async_trait]
impl LocalityResolver for ViaCepResolver {
    #[instrument(skip(self), fields(cep = %code))]
    async fn resolve(&self, code: &PostalCode) -> Result<Locality, LookupError> {
        let url = self.lookup_url(code);
        debug!("ViaCEP request URL: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("ViaCEP request failed: {}", e);
            LookupError::Unavailable(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("ViaCEP returned status {}", status);
            return Err(LookupError::Unavailable(format!("status {status}")));
        }

        let body: ViaCepResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse ViaCEP response: {}", e);
            LookupError::Unavailable(format!("invalid response: {e}"))
        })?;

        let locality = body.into_locality(code)?;
        debug!("Resolved locality: {}", locality);
        Ok(locality)
    }
}
