//! Currency code model
//!
//! Currency codes are stored upper-cased so "usd" and "USD" name the same
//! currency everywhere (accounts, transactions, and the rate table).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A three-letter currency code such as `USD` or `EUR`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and normalize a currency code
    pub fn parse(s: &str) -> Result<Self, CurrencyCodeError> {
        let code = s.trim().to_ascii_uppercase();

        if code.is_empty() {
            return Err(CurrencyCodeError::Empty);
        }

        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyCodeError::Invalid(s.trim().to_string()));
        }

        Ok(Self(code))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Validation errors for currency codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyCodeError {
    Empty,
    Invalid(String),
}

impl fmt::Display for CurrencyCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Currency code cannot be empty"),
            Self::Invalid(s) => {
                write!(f, "Invalid currency code '{}' (expected three letters)", s)
            }
        }
    }
}

impl std::error::Error for CurrencyCodeError {}
