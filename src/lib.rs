//! bank-ledger - multi-currency personal bank ledger
//!
//! This library keeps named accounts, each with a home currency, an ordered
//! list of transactions, and a running balance. Transactions in foreign
//! currencies are converted through a table of dated exchange rates, and
//! every posting is checked against the account's policy: debit accounts may
//! not go negative and credit accounts may not exceed their limit.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, currencies, rates, transactions, ledgers)
//! - `storage`: JSON file storage layer
//! - `services`: Account registry and CSV import
//! - `cli`: Command handlers for the `ledger` binary
//! - `display`: Terminal formatting
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use bank_ledger::config::{LedgerPaths, Settings};
//! use bank_ledger::services::AccountRegistry;
//! use bank_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let registry = AccountRegistry::open(Storage::new(paths)?)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
