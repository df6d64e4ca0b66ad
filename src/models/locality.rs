//! Locality model produced by the address lookup

use std::fmt;

/// Place name plus state code, as returned by the address lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    /// City or town name (e.g. "São Paulo")
    pub name: String,
    /// Two-letter state code (e.g. "SP")
    pub region: String,
}

impl Locality {
    #[must_use]
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }

    /// Query string understood by the weather provider: `name,region`
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("{},{}", self.name, self.region)
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.region)
    }
}
