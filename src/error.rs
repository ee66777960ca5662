//! Custom error types for the bank ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{CurrencyCode, Money};

/// A proposed transaction that would break an account's balance invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    /// Debit accounts may never go below zero
    #[error("Cannot have negative balance in Debit account (would be {balance})")]
    NegativeDebitBalance { balance: Money },

    /// Credit accounts may not go below the negated credit limit
    #[error("Credit limit exceeded: balance would be {balance}, limit is {limit}")]
    CreditLimitExceeded { balance: Money, limit: Money },
}

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A transaction was rejected and rolled back
    #[error("Transaction rejected: {0}")]
    Policy(#[from] PolicyViolation),

    /// No entry for the ordered pair in the rate table
    #[error("No exchange rate registered for {base} -> {target}")]
    RateNotFound {
        base: CurrencyCode,
        target: CurrencyCode,
    },

    /// A transaction needs a conversion that the rate table cannot provide
    #[error("Currency conversion rate not available: {from} -> {to}")]
    ConversionUnavailable { from: CurrencyCode, to: CurrencyCode },

    /// The rate exists but only applies from a later date
    #[error(
        "Currency rate {from} -> {to} is effective from {effective_date}, \
         not available for {transaction_date}"
    )]
    StaleRate {
        from: CurrencyCode,
        to: CurrencyCode,
        transaction_date: NaiveDate,
        effective_date: NaiveDate,
    },

    /// A sum or conversion exceeded the representable decimal range
    #[error("Amount out of range while computing {context}")]
    AmountOverflow { context: &'static str },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Reading or writing the data files failed
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl LedgerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for accounts
    pub fn duplicate_account(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if a transaction was rejected by the account's balance policy
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::Policy(_))
    }

    /// Check if a balance could not be computed for lack of a usable rate
    pub fn is_conversion_failure(&self) -> bool {
        matches!(
            self,
            Self::ConversionUnavailable { .. } | Self::StaleRate { .. }
        )
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
