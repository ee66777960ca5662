//! Transaction model
//!
//! A transaction is a dated, signed amount in some currency. Positive amounts
//! are inflows, negative amounts are outflows. Transactions never change once
//! created; corrections are new transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::CurrencyCode;
use super::money::Money;

/// An immutable ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    date: NaiveDate,
    description: String,
    amount: Money,
    currency: CurrencyCode,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            currency,
        }
    }

    /// Date the transaction took place
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Free-text description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Signed amount in the transaction's own currency
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Currency the amount is denominated in
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Check if this transaction falls within an inclusive date range
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.date && self.date <= end
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount.format_with_code(&self.currency)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            date(2023, 11, 1),
            "Salary",
            Money::new(dec!(500)),
            CurrencyCode::parse("USD").unwrap(),
        );
        assert_eq!(txn.date(), date(2023, 11, 1));
        assert_eq!(txn.description(), "Salary");
        assert_eq!(txn.amount(), Money::new(dec!(500)));
        assert_eq!(txn.currency().as_str(), "USD");
    }

    #[test]
    fn test_is_within_includes_boundaries() {
        let txn = Transaction::new(
            date(2023, 11, 5),
            "Rent",
            Money::new(dec!(-200)),
            CurrencyCode::parse("USD").unwrap(),
        );
        assert!(txn.is_within(date(2023, 11, 5), date(2023, 11, 5)));
        assert!(txn.is_within(date(2023, 11, 1), date(2023, 11, 30)));
        assert!(!txn.is_within(date(2023, 11, 6), date(2023, 11, 30)));
        assert!(!txn.is_within(date(2023, 11, 6), date(2023, 11, 1)));
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(
            date(2023, 11, 10),
            "Groceries",
            Money::new(dec!(-50)),
            CurrencyCode::parse("USD").unwrap(),
        );
        assert_eq!(format!("{}", txn), "2023-11-10: Groceries - -50.00 USD");
    }

    #[test]
    fn test_serialization_matches_data_file() {
        let json = r#"{"date":"2023-11-01","description":"Salary","amount":500,"currency":"USD"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.date(), date(2023, 11, 1));
        assert_eq!(txn.amount(), Money::new(dec!(500)));

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["date"], "2023-11-01");
        assert_eq!(value["currency"], "USD");
    }
}
