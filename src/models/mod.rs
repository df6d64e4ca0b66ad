//! Data models for the CEP weather service
//!
//! This module contains the request-scoped domain models organized by concern:
//! - Postal code: validated eight-digit CEP
//! - Locality: resolved place name and state code
//! - Temperature: unit conversion and response payloads

pub mod locality;
pub mod postal_code;
pub mod temperature;

// Re-export all public types for convenient access
pub use locality::Locality;
pub use postal_code::{PostalCode, is_valid_postal_code};
pub use temperature::{
    ErrorResponse, TemperatureResponse, celsius_to_fahrenheit, celsius_to_kelvin,
};
