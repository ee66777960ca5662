//! Account model
//!
//! Account types and the rules for account names. The account's transactions
//! and balance live in [`Ledger`](super::Ledger).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of an account name
pub const MAX_ACCOUNT_NAME_LEN: usize = 100;

/// Type of account, which decides the balance policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountType {
    /// Balance may never drop below zero
    #[default]
    Debit,
    /// Balance may drop to the negated credit limit
    Credit,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "checking" | "savings" => Some(Self::Debit),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "Debit"),
            Self::Credit => write!(f, "Credit"),
        }
    }
}

/// Validate an account name, returning the trimmed form
pub fn validate_account_name(name: &str) -> Result<&str, AccountValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(AccountValidationError::EmptyName);
    }

    if name.len() > MAX_ACCOUNT_NAME_LEN {
        return Err(AccountValidationError::NameTooLong(name.len()));
    }

    Ok(name)
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeCreditLimit,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(
                    f,
                    "Account name too long ({} chars, max {})",
                    len, MAX_ACCOUNT_NAME_LEN
                )
            }
            Self::NegativeCreditLimit => write!(f, "Credit limit cannot be negative"),
        }
    }
}

impl std::error::Error for AccountValidationError {}
