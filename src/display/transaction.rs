//! Transaction display formatting
//!
//! Provides utilities for formatting transactions as a register.

use crate::models::Transaction;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction) -> String {
    format!(
        "{} {:30} {:>14} {}",
        txn.date().format("%Y-%m-%d"),
        truncate(txn.description(), 30),
        txn.amount().to_string(),
        txn.currency()
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[&Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:30} {:>14} {}\n",
        "Date", "Description", "Amount", "Cur"
    ));
    output.push_str(&"-".repeat(59));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, Money};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn(description: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2023, 11, 5).unwrap(),
            description,
            Money::new(dec!(-200)),
            CurrencyCode::parse("USD").unwrap(),
        )
    }

    #[test]
    fn test_row() {
        let row = format_transaction_row(&txn("Rent"));
        assert!(row.starts_with("2023-11-05 Rent"));
        assert!(row.ends_with("-200.00 USD"));
    }

    #[test]
    fn test_register() {
        let rent = txn("Rent");
        let output = format_transaction_register(&[&rent]);
        assert_eq!(output.lines().count(), 3);
        assert_eq!(format_transaction_register(&[]), "No transactions found.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long description", 10), "a very ...");
    }
}
