//! Core data models for the bank ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: money, currencies, transactions, accounts and exchange rates.

pub mod account;
pub mod currency;
pub mod ledger;
pub mod money;
pub mod rate;
pub mod transaction;

pub use account::{AccountType, AccountValidationError};
pub use currency::{CurrencyCode, CurrencyCodeError};
pub use ledger::{ImportOutcome, Ledger, RejectedTransaction};
pub use money::{Money, MoneyParseError};
pub use rate::{CurrencyRateTable, RateEntry};
pub use transaction::Transaction;
