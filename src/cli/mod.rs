//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the account registry.

pub mod account;
pub mod rate;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use rate::{handle_rate_command, RateCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CurrencyCode, Money};

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date_arg(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn date_or_today(s: Option<&str>) -> LedgerResult<NaiveDate> {
    match s {
        Some(s) => parse_date_arg(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub(crate) fn parse_currency_arg(s: &str) -> LedgerResult<CurrencyCode> {
    CurrencyCode::parse(s).map_err(|e| LedgerError::Validation(e.to_string()))
}

pub(crate) fn parse_amount_arg(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount '{}'. Use a format like '-50.00' or '1200'. Error: {}",
            s, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2023-11-05").unwrap(),
            NaiveDate::from_ymd_opt(2023, 11, 5).unwrap()
        );
        assert!(parse_date_arg("11/05/2023").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount_arg() {
        assert_eq!(parse_amount_arg("-50").unwrap(), Money::new(dec!(-50)));
        assert!(parse_amount_arg("fifty").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_currency_arg() {
        assert_eq!(parse_currency_arg("eur").unwrap().as_str(), "EUR");
        assert!(parse_currency_arg("euro").is_err());
    }
}
