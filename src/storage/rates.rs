//! Rate store for JSON storage
//!
//! Manages loading and saving the exchange-rate table to currency_rates.json

use std::path::PathBuf;

use crate::error::LedgerResult;
use crate::models::CurrencyRateTable;

use super::file_io::{read_json, write_json_atomic};

/// Store for rate table persistence
#[derive(Debug, Clone)]
pub struct RateStore {
    path: PathBuf,
}

impl RateStore {
    /// Create a new rate store
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the rate table; a missing file is an empty table
    pub fn load(&self) -> LedgerResult<CurrencyRateTable> {
        read_json(&self.path)
    }

    /// Save the rate table
    pub fn save(&self, rates: &CurrencyRateTable) -> LedgerResult<()> {
        write_json_atomic(&self.path, rates)
    }
}
