//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{AccountType, Ledger};

/// Format a list of accounts with balances as a table
///
/// Balances are in each account's own currency, so no total row is printed.
pub fn format_account_list(accounts: &[(&str, &Ledger)]) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<6}  {:<8}  {:>14}  {:>12}\n",
        "Name",
        "Type",
        "Currency",
        "Balance",
        "Limit",
        name_width = name_width,
    ));

    output.push_str(&format!(
        "{:-<name_width$}  {:-<6}  {:-<8}  {:->14}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (name, ledger) in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:<6}  {:<8}  {:>14}  {:>12}\n",
            name,
            ledger.account_type().to_string(),
            ledger.currency().as_str(),
            balance_column(ledger),
            limit_column(ledger),
            name_width = name_width,
        ));
    }

    output
}

/// Format account details for display
pub fn format_account_details(name: &str, ledger: &Ledger) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account:      {}\n", name));
    output.push_str(&format!("Type:         {}\n", ledger.account_type()));
    output.push_str(&format!("Currency:     {}\n", ledger.currency()));
    if ledger.account_type() == AccountType::Credit {
        output.push_str(&format!(
            "Credit Limit: {}\n",
            ledger.credit_limit().unwrap_or_default()
        ));
    }
    match ledger.balance() {
        Some(balance) => output.push_str(&format!(
            "Balance:      {}\n",
            balance.format_with_code(ledger.currency())
        )),
        None => output.push_str("Balance:      unavailable (missing or later-dated exchange rate)\n"),
    }
    output.push_str(&format!("Transactions: {}\n", ledger.transactions().len()));

    if let Some(last) = ledger.transactions().last() {
        output.push_str(&format!("Last Entry:   {}\n", last));
    }

    output
}

fn balance_column(ledger: &Ledger) -> String {
    ledger
        .balance()
        .map(|balance| balance.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn limit_column(ledger: &Ledger) -> String {
    match ledger.account_type() {
        AccountType::Credit => ledger.credit_limit().unwrap_or_default().to_string(),
        AccountType::Debit => "-".to_string(),
    }
}
