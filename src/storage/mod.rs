//! Storage layer for the bank ledger
//!
//! Provides JSON file storage for accounts and exchange rates, with
//! automatic directory creation. The two files are written independently;
//! there is no transaction spanning both.

pub mod accounts;
pub mod file_io;
pub mod rates;

pub use accounts::{AccountData, AccountRecord, AccountStore};
pub use file_io::{read_json, write_json_atomic};
pub use rates::RateStore;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Storage coordinator that provides access to both stores
#[derive(Debug, Clone)]
pub struct Storage {
    pub accounts: AccountStore,
    pub rates: RateStore,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountStore::new(paths.accounts_file()),
            rates: RateStore::new(paths.rates_file()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(
            storage.accounts.path(),
            &temp_dir.path().join("data").join("bank_data.json")
        );
        assert_eq!(
            storage.rates.path(),
            &temp_dir.path().join("data").join("currency_rates.json")
        );
    }
}
