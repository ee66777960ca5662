//! Exchange rate CLI commands

use clap::Subcommand;
use rust_decimal::Decimal;

use super::{date_or_today, parse_currency_arg};
use crate::display::rate::format_rate_table;
use crate::error::{LedgerError, LedgerResult};
use crate::services::AccountRegistry;

/// Rate subcommands
#[derive(Subcommand)]
pub enum RateCommands {
    /// Register the rate converting BASE amounts into TARGET
    Set {
        /// Currency converted from
        base: String,
        /// Currency converted into
        target: String,
        /// Multiplier (e.g., "0.9")
        rate: String,
        /// Effective date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List registered rates
    List,
}

/// Handle a rate command
pub fn handle_rate_command(registry: &mut AccountRegistry, cmd: RateCommands) -> LedgerResult<()> {
    match cmd {
        RateCommands::Set {
            base,
            target,
            rate,
            date,
        } => {
            let base = parse_currency_arg(&base)?;
            let target = parse_currency_arg(&target)?;
            let rate: Decimal = rate.trim().parse().map_err(|_| {
                LedgerError::Validation(format!("Invalid rate '{}'", rate))
            })?;
            let date = date_or_today(date.as_deref())?;

            let message = format!("Set rate {} -> {}: {} (effective {})", base, target, rate, date);
            registry.create_currency_rate(base, target, rate, date)?;
            println!("{}", message);
        }

        RateCommands::List => {
            print!("{}", format_rate_table(registry.rates()));
        }
    }

    Ok(())
}
