//! Temperature conversion and response payloads

use serde::{Serialize, Serializer};

/// Offset applied for Celsius to Kelvin. Kept at 273 (not 273.15) so that
/// responses match the values existing clients already receive.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Convert temperature from Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Convert temperature from Celsius to Kelvin
#[must_use]
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Successful response body
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct TemperatureResponse {
    #[serde(rename = "temp_C", serialize_with = "serialize_number")]
    pub temp_c: f64,
    #[serde(rename = "temp_F", serialize_with = "serialize_number")]
    pub temp_f: f64,
    #[serde(rename = "temp_K", serialize_with = "serialize_number")]
    pub temp_k: f64,
}

impl TemperatureResponse {
    /// Build all three units from a Celsius reading
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            temp_c: celsius,
            temp_f: celsius_to_fahrenheit(celsius),
            temp_k: celsius_to_kelvin(celsius),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Whole numbers go out as `25`, not `25.0`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
