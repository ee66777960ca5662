//! Account store for JSON storage
//!
//! Loads and saves `bank_data.json`: an object under `"accounts"` keyed by
//! account name, each holding the account settings and its transactions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountType, CurrencyCode, CurrencyRateTable, Ledger, Money, Transaction};

use super::file_io::{read_json, write_json_atomic};

/// One account as written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_type: AccountType,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub credit_limit: Option<Money>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl AccountRecord {
    /// Snapshot a ledger for writing
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            account_type: ledger.account_type(),
            currency: ledger.currency().clone(),
            credit_limit: ledger.credit_limit(),
            transactions: ledger.transactions().to_vec(),
        }
    }

    /// Rebuild the ledger, recomputing its balance against `rates`
    pub fn into_ledger(self, rates: &CurrencyRateTable) -> LedgerResult<Ledger> {
        Ledger::restore(
            self.account_type,
            self.currency,
            self.credit_limit,
            self.transactions,
            rates,
        )
    }
}

/// Serializable account data structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    #[serde(default)]
    pub accounts: BTreeMap<String, AccountRecord>,
}

impl AccountData {
    /// Snapshot every ledger in a registry
    pub fn from_ledgers<'a, I>(ledgers: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Ledger)>,
    {
        Self {
            accounts: ledgers
                .into_iter()
                .map(|(name, ledger)| (name.clone(), AccountRecord::from_ledger(ledger)))
                .collect(),
        }
    }

    /// Rebuild every ledger
    ///
    /// An account whose history no longer converts is kept with its balance
    /// unavailable. Only an invalid record (a negative credit limit) fails the
    /// load.
    pub fn into_ledgers(self, rates: &CurrencyRateTable) -> LedgerResult<BTreeMap<String, Ledger>> {
        self.accounts
            .into_iter()
            .map(|(name, record)| {
                record
                    .into_ledger(rates)
                    .map(|ledger| (name.clone(), ledger))
                    .map_err(|e| {
                        LedgerError::Persistence(format!(
                            "Failed to restore account '{}': {}",
                            name, e
                        ))
                    })
            })
            .collect()
    }
}

/// Store for account persistence
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    /// Create a new account store
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load accounts from disk; a missing file is an empty registry
    pub fn load(&self) -> LedgerResult<AccountData> {
        read_json(&self.path)
    }

    /// Save accounts to disk
    pub fn save(&self, data: &AccountData) -> LedgerResult<()> {
        write_json_atomic(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, AccountStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bank_data.json");
        let store = AccountStore::new(path);
        (temp_dir, store)
    }

    fn usd() -> CurrencyCode {
        CurrencyCode::parse("USD").unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        let data = store.load().unwrap();
        assert!(data.accounts.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, store) = create_test_store();
        let rates = CurrencyRateTable::new();

        let mut ledger = Ledger::new(AccountType::Credit, usd(), Some(Money::new(dec!(100)))).unwrap();
        ledger
            .add_transaction(
                Transaction::new(
                    NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
                    "Dinner",
                    Money::new(dec!(-80)),
                    usd(),
                ),
                &rates,
            )
            .unwrap();

        let name = "Visa".to_string();
        store
            .save(&AccountData::from_ledgers([(&name, &ledger)]))
            .unwrap();

        let ledgers = store.load().unwrap().into_ledgers(&rates).unwrap();
        let restored = &ledgers["Visa"];
        assert_eq!(restored, &ledger);
        assert_eq!(restored.balance(), Some(Money::new(dec!(-80))));
    }

    #[test]
    fn test_reads_original_layout() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(
            store.path(),
            r#"{
                "accounts": {
                    "test_account": {
                        "account_type": "Debit",
                        "currency": "USD",
                        "credit_limit": null,
                        "transactions": [
                            {"date": "2023-11-01", "description": "Salary", "amount": 500, "currency": "USD"},
                            {"date": "2023-11-05", "description": "Rent", "amount": -200.0, "currency": "USD"}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let ledgers = store
            .load()
            .unwrap()
            .into_ledgers(&CurrencyRateTable::new())
            .unwrap();
        let ledger = &ledgers["test_account"];
        assert_eq!(ledger.account_type(), AccountType::Debit);
        assert_eq!(ledger.credit_limit(), None);
        assert_eq!(ledger.balance(), Some(Money::new(dec!(300))));
    }

    #[test]
    fn test_unconvertible_history_still_loads() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(
            store.path(),
            r#"{"accounts": {"Travel": {"account_type": "Debit", "currency": "USD", "credit_limit": null,
                "transactions": [{"date": "2023-11-01", "description": "Taxi", "amount": 10, "currency": "EUR"}]}}}"#,
        )
        .unwrap();

        let ledgers = store
            .load()
            .unwrap()
            .into_ledgers(&CurrencyRateTable::new())
            .unwrap();
        let travel = &ledgers["Travel"];
        assert_eq!(travel.transactions().len(), 1);
        assert_eq!(travel.balance(), None);
    }

    #[test]
    fn test_restore_failure_names_account() {
        let (_temp_dir, store) = create_test_store();
        std::fs::write(
            store.path(),
            r#"{"accounts": {"Visa": {"account_type": "Credit", "currency": "USD", "credit_limit": -5,
                "transactions": []}}}"#,
        )
        .unwrap();

        let err = store
            .load()
            .unwrap()
            .into_ledgers(&CurrencyRateTable::new())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert!(err.to_string().contains("Visa"));
    }

    #[test]
    fn test_written_layout() {
        let (_temp_dir, store) = create_test_store();
        let ledger = Ledger::new(AccountType::Debit, usd(), None).unwrap();
        let name = "Checking".to_string();
        store
            .save(&AccountData::from_ledgers([(&name, &ledger)]))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let account = &raw["accounts"]["Checking"];
        assert_eq!(account["account_type"], "Debit");
        assert_eq!(account["currency"], "USD");
        assert!(account["credit_limit"].is_null());
        assert!(account["transactions"].as_array().unwrap().is_empty());
    }
}
