//! Postal code (CEP) model and format validation

use std::fmt;

/// Number of digits in a CEP
pub const POSTAL_CODE_LEN: usize = 8;

/// Check that `code` is exactly eight ASCII decimal digits.
#[must_use]
pub fn is_valid_postal_code(code: &str) -> bool {
    code.len() == POSTAL_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// A postal code that passed format validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse a raw string, returning `None` unless it is a well-formed CEP
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        is_valid_postal_code(raw).then(|| Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
