//! Transaction CLI commands
//!
//! Implements CLI commands for posting transactions and importing CSV files.

use std::path::Path;

use clap::Subcommand;
use tracing::warn;

use super::{date_or_today, parse_amount_arg, parse_currency_arg};
use crate::config::Settings;
use crate::display::transaction::format_transaction_row;
use crate::error::{LedgerError, LedgerResult};
use crate::services::{AccountRegistry, ColumnMapping, CsvImporter};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Account name
        account: String,
        /// Amount (e.g., "-50.00" for outflow, "100.00" for inflow)
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
        /// Transaction currency; defaults to the account's currency
        #[arg(short, long)]
        currency: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Import transactions from a CSV file
    Import {
        /// Path to CSV file
        file: String,
        /// Target account
        #[arg(short, long)]
        account: String,
        /// Date format of the file (strftime); defaults to the configured format
        #[arg(long)]
        date_format: Option<String>,
        /// Field delimiter
        #[arg(long, default_value_t = ',')]
        delimiter: char,
        /// The file has no header row (columns are Date,Description,Amount,Currency)
        #[arg(long)]
        no_header: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    registry: &mut AccountRegistry,
    settings: &Settings,
    cmd: TransactionCommands,
) -> LedgerResult<()> {
    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            description,
            currency,
            date,
        } => {
            let amount = parse_amount_arg(&amount)?;
            let date = date_or_today(date.as_deref())?;
            let currency = match currency {
                Some(code) => parse_currency_arg(&code)?,
                None => registry.account(&account)?.currency().clone(),
            };

            let balance =
                registry.record_transaction(&account, date, &description, amount, currency)?;
            let home = registry.account(&account)?.currency();

            println!("Recorded transaction on '{}'", account);
            println!("  New Balance: {}", balance.format_with_code(home));
        }

        TransactionCommands::Import {
            file,
            account,
            date_format,
            delimiter,
            no_header,
        } => {
            if !delimiter.is_ascii() {
                return Err(LedgerError::Validation(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    delimiter
                )));
            }
            let home = registry.account(&account)?.currency().clone();

            let path = Path::new(&file);
            if !path.exists() {
                return Err(LedgerError::Import(format!("File not found: {}", file)));
            }
            let content = std::fs::read_to_string(path)
                .map_err(|e| LedgerError::Import(format!("Failed to read file: {}", e)))?;

            let format = date_format.as_deref().unwrap_or(&settings.date_format);
            let mapping = ColumnMapping::new()
                .with_date_format(format)
                .with_delimiter(delimiter as u8)
                .with_header(!no_header);
            let importer = CsvImporter::new(mapping, home);
            let parsed = importer.parse(&content)?;

            for error in &parsed.errors {
                warn!(row = error.row, "{}", error.message);
            }

            if parsed.transactions.is_empty() {
                println!("No transactions found in CSV file.");
                return Ok(());
            }

            let outcome = registry.import_transactions_to_account(&account, parsed.transactions)?;

            println!("Import into '{}'", account);
            println!("{}", "=".repeat(40));
            println!("  Imported:          {}", outcome.accepted);
            println!("  Rejected (policy): {}", outcome.rejected.len());
            println!("  Skipped (errors):  {}", parsed.errors.len());

            if !outcome.is_complete() {
                println!();
                println!("Rejected transactions:");
                for rejected in &outcome.rejected {
                    println!(
                        "  {}  ({})",
                        format_transaction_row(&rejected.transaction),
                        rejected.violation
                    );
                }
            }

            let balance = registry.balance_of(&account)?;
            println!();
            println!("Balance: {}", balance.format_with_code(registry.account(&account)?.currency()));
        }
    }

    Ok(())
}
