//! Error types and handling for the CEP weather service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Main error type for process-level failures (start-up, configuration)
#[derive(Error, Debug)]
pub enum CepWeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// HTTP client construction errors
    #[error("HTTP client error: {message}")]
    HttpClient { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CepWeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new HTTP client error
    pub fn http_client<S: Into<String>>(message: S) -> Self {
        Self::HttpClient {
            message: message.into(),
        }
    }
}

/// Failures of the address lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The lookup answered, but knows no such postal code
    #[error("Postal code not found: {0}")]
    NotFound(String),

    /// Transport, status or decode failure
    #[error("Address lookup unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the weather provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Transport, status or decode failure
    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned to HTTP clients
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("Método não permitido")]
    MethodNotAllowed,

    #[error("CEP inválido")]
    InvalidPostalCode,

    #[error("CEP não encontrado")]
    PostalCodeNotFound,

    #[error("Erro ao obter temperatura")]
    TemperatureUnavailable,
}

impl ApiError {
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidPostalCode => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PostalCodeNotFound => StatusCode::NOT_FOUND,
            Self::TemperatureUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// A lookup outage is reported the same way as an unknown CEP.
impl From<LookupError> for ApiError {
    fn from(_: LookupError) -> Self {
        Self::PostalCodeNotFound
    }
}

impl From<WeatherError> for ApiError {
    fn from(_: WeatherError) -> Self {
        Self::TemperatureUnavailable
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
