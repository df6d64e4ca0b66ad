//! `cep-weather` - current temperature by Brazilian postal code
//!
//! Resolves a CEP to a locality through ViaCEP, fetches the current
//! temperature for that locality from WeatherAPI, and serves it in Celsius,
//! Fahrenheit and Kelvin over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::{AppState, router};
pub use config::AppConfig;
pub use error::{ApiError, CepWeatherError, LookupError, WeatherError};
pub use location_resolver::{LocalityResolver, ViaCepResolver};
pub use models::{Locality, PostalCode, TemperatureResponse};
pub use weather::{TemperatureFetcher, WeatherApiClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
