//! Account CLI commands
//!
//! Implements CLI commands for account management and balance queries.

use clap::Subcommand;

use super::{date_or_today, parse_amount_arg, parse_currency_arg, parse_date_arg};
use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::display::transaction::format_transaction_register;
use crate::error::{LedgerError, LedgerResult};
use crate::models::AccountType;
use crate::services::AccountRegistry;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (debit, credit)
        #[arg(short = 't', long, default_value = "debit")]
        account_type: String,
        /// Home currency; defaults to the configured currency
        #[arg(short, long)]
        currency: Option<String>,
        /// Credit limit (credit accounts only)
        #[arg(short, long)]
        limit: Option<String>,
    },
    /// List all accounts
    List,
    /// Show account details
    Show {
        /// Account name
        account: String,
    },
    /// Show an account balance
    Balance {
        /// Account name
        account: String,
        /// Count only transactions on or before this date (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,
        /// Sum amounts without currency conversion (requires --as-of)
        #[arg(long, requires = "as_of")]
        nominal: bool,
    },
    /// List an account's transactions within a date range
    Transactions {
        /// Account name
        account: String,
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), inclusive; defaults to today
        #[arg(long)]
        to: Option<String>,
    },
}

/// Handle an account command
pub fn handle_account_command(
    registry: &mut AccountRegistry,
    settings: &Settings,
    cmd: AccountCommands,
) -> LedgerResult<()> {
    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            currency,
            limit,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: debit, credit",
                    account_type
                ))
            })?;

            let currency = match currency {
                Some(code) => parse_currency_arg(&code)?,
                None => settings.default_currency.clone(),
            };

            let credit_limit = limit.as_deref().map(parse_amount_arg).transpose()?;
            if credit_limit.is_some() && account_type == AccountType::Debit {
                return Err(LedgerError::Validation(
                    "A credit limit only applies to credit accounts".into(),
                ));
            }

            let ledger = registry.create_account(&name, account_type, currency, credit_limit)?;

            println!("Created account: {}", name.trim());
            println!("  Type: {}", ledger.account_type());
            println!("  Currency: {}", ledger.currency());
            if let Some(limit) = ledger.credit_limit() {
                println!("  Credit Limit: {}", limit);
            }
        }

        AccountCommands::List => {
            let accounts: Vec<_> = registry.accounts().collect();
            print!("{}", format_account_list(&accounts));
        }

        AccountCommands::Show { account } => {
            let ledger = registry.account(&account)?;
            print!("{}", format_account_details(&account, ledger));
        }

        AccountCommands::Balance {
            account,
            as_of,
            nominal,
        } => {
            let currency = registry.account(&account)?.currency().clone();

            let balance = match as_of.as_deref() {
                None => registry.balance_of(&account)?,
                Some(date) => {
                    let date = parse_date_arg(date)?;
                    if nominal {
                        registry.nominal_total_as_of(&account, date)?
                    } else {
                        registry.balance_as_of(&account, date)?
                    }
                }
            };

            println!("{}", balance.format_with_code(&currency));
        }

        AccountCommands::Transactions { account, from, to } => {
            let ledger = registry.account(&account)?;
            let start = match from.as_deref() {
                Some(date) => parse_date_arg(date)?,
                None => match ledger.transactions().iter().map(|t| t.date()).min() {
                    Some(earliest) => earliest,
                    None => {
                        println!("No transactions found.");
                        return Ok(());
                    }
                },
            };
            let end = date_or_today(to.as_deref())?;

            let transactions = registry.transactions_in_range(&account, start, end)?;
            print!("{}", format_transaction_register(&transactions));
        }
    }

    Ok(())
}
