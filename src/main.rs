use anyhow::Result;
use clap::{Parser, Subcommand};

use bank_ledger::cli::{
    handle_account_command, handle_rate_command, handle_transaction_command, AccountCommands,
    RateCommands, TransactionCommands,
};
use bank_ledger::config::{LedgerPaths, Settings};
use bank_ledger::logging::init_tracing;
use bank_ledger::services::AccountRegistry;
use bank_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Multi-currency personal bank ledger",
    long_about = "Keeps debit and credit accounts with running balances, converts \
                  foreign-currency transactions through dated exchange rates, and \
                  rejects postings that would overdraw an account."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management and balance queries
    #[command(subcommand)]
    Account(AccountCommands),

    /// Post or import transactions
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Exchange rate management
    #[command(subcommand)]
    Rate(RateCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("ledger - multi-currency personal bank ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
            return Ok(());
        }
    };

    if let Commands::Config = command {
        let settings_file = paths.settings_file();
        let created = !settings_file.exists();
        if created {
            settings.save(&paths)?;
        }

        println!("Bank Ledger Configuration");
        println!("=========================");
        println!("Base directory: {}", paths.base_dir().display());
        println!(
            "Settings file:  {}{}",
            settings_file.display(),
            if created { " (created with defaults)" } else { "" }
        );
        println!("Accounts file:  {}", paths.accounts_file().display());
        println!("Rates file:     {}", paths.rates_file().display());
        println!();
        println!("Settings:");
        println!("  Default currency: {}", settings.default_currency);
        println!("  Date format:      {}", settings.date_format);
        println!("  Log filter:       {}", settings.log_filter);
        return Ok(());
    }

    let mut registry = AccountRegistry::open(Storage::new(paths)?)?;

    match command {
        Commands::Account(cmd) => handle_account_command(&mut registry, &settings, cmd)?,
        Commands::Transaction(cmd) => handle_transaction_command(&mut registry, &settings, cmd)?,
        Commands::Rate(cmd) => handle_rate_command(&mut registry, cmd)?,
        Commands::Config => {}
    }

    Ok(())
}
