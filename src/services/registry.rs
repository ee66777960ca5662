//! Account registry
//!
//! The registry owns every ledger, keyed by account name, together with the
//! exchange-rate table the ledgers convert through. It is the only component
//! that reads or writes the data files: each mutating call rewrites the
//! affected file before returning.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::account::validate_account_name;
use crate::models::{
    AccountType, CurrencyCode, CurrencyRateTable, ImportOutcome, Ledger, Money, Transaction,
};
use crate::storage::{AccountData, Storage};

/// Registry of named accounts backed by JSON storage
pub struct AccountRegistry {
    storage: Storage,
    accounts: BTreeMap<String, Ledger>,
    rates: CurrencyRateTable,
}

impl AccountRegistry {
    /// Load rates, then accounts, from storage
    ///
    /// Rates come first because restoring a ledger recomputes its balance.
    pub fn open(storage: Storage) -> LedgerResult<Self> {
        let rates = storage.rates.load()?;
        let accounts = storage.accounts.load()?.into_ledgers(&rates)?;

        info!(
            accounts = accounts.len(),
            rates = rates.len(),
            "ledger data loaded"
        );

        Ok(Self {
            storage,
            accounts,
            rates,
        })
    }

    /// Create a new account
    pub fn create_account(
        &mut self,
        name: &str,
        account_type: AccountType,
        currency: CurrencyCode,
        credit_limit: Option<Money>,
    ) -> LedgerResult<&Ledger> {
        let name = validate_account_name(name)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        if self.accounts.contains_key(name) {
            return Err(LedgerError::duplicate_account(name));
        }

        let ledger = Ledger::new(account_type, currency, credit_limit)?;
        self.accounts.insert(name.to_string(), ledger);
        info!(account = name, %account_type, "account created");

        self.save_accounts()?;
        self.account(name)
    }

    /// Record a single transaction and return the new balance
    pub fn record_transaction(
        &mut self,
        name: &str,
        date: NaiveDate,
        description: &str,
        amount: Money,
        currency: CurrencyCode,
    ) -> LedgerResult<Money> {
        let transaction = Transaction::new(date, description, amount, currency);
        let rates = &self.rates;
        let ledger = Self::lookup_mut(&mut self.accounts, name)?;

        let balance = ledger.add_transaction(transaction, rates)?;
        self.save_accounts()?;
        Ok(balance)
    }

    /// Import a batch of transactions into an account
    ///
    /// Whatever was accepted is written to disk even when the batch stops on
    /// a conversion failure.
    pub fn import_transactions_to_account(
        &mut self,
        name: &str,
        transactions: Vec<Transaction>,
    ) -> LedgerResult<ImportOutcome> {
        let rates = &self.rates;
        let ledger = Self::lookup_mut(&mut self.accounts, name)?;

        let result = ledger.import_transactions(transactions, rates);
        let persisted = self.save_accounts();

        let outcome = result?;
        persisted?;

        info!(
            account = name,
            accepted = outcome.accepted,
            rejected = outcome.rejected.len(),
            "transactions imported"
        );
        Ok(outcome)
    }

    /// Register or replace the rate for `base -> target`
    ///
    /// Accounts whose balance was unavailable are retried against the new
    /// table; other balances are left as they were computed.
    pub fn create_currency_rate(
        &mut self,
        base: CurrencyCode,
        target: CurrencyCode,
        rate: Decimal,
        date: NaiveDate,
    ) -> LedgerResult<()> {
        let pair = format!("{}->{}", base, target);
        self.rates.set_rate(base, target, rate, date)?;
        info!(%pair, %rate, %date, "currency rate set");

        for (name, ledger) in self.accounts.iter_mut() {
            if ledger.balance().is_none() && ledger.refresh_balance(&self.rates) {
                info!(account = %name, "balance available again");
            }
        }

        self.storage.rates.save(&self.rates)
    }

    /// Look up an account; surrounding whitespace in `name` is ignored
    pub fn account(&self, name: &str) -> LedgerResult<&Ledger> {
        let name = name.trim();
        self.accounts
            .get(name)
            .ok_or_else(|| LedgerError::account_not_found(name))
    }

    /// All accounts, ordered by name
    pub fn accounts(&self) -> impl Iterator<Item = (&str, &Ledger)> {
        self.accounts.iter().map(|(name, ledger)| (name.as_str(), ledger))
    }

    /// The exchange-rate table
    pub fn rates(&self) -> &CurrencyRateTable {
        &self.rates
    }

    /// Current balance of an account
    ///
    /// Fails with the conversion error when the balance is unavailable.
    pub fn balance_of(&self, name: &str) -> LedgerResult<Money> {
        self.account(name)?.current_balance(&self.rates)
    }

    /// Balance of an account counting transactions on or before `date`
    pub fn balance_as_of(&self, name: &str, date: NaiveDate) -> LedgerResult<Money> {
        self.account(name)?.balance_as_of(date, &self.rates)
    }

    /// Unconverted sum of an account's amounts on or before `date`
    pub fn nominal_total_as_of(&self, name: &str, date: NaiveDate) -> LedgerResult<Money> {
        self.account(name)?.nominal_total_as_of(date)
    }

    /// Transactions of an account dated within `start..=end`
    pub fn transactions_in_range(
        &self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LedgerResult<Vec<&Transaction>> {
        Ok(self.account(name)?.transactions_in_range(start, end))
    }

    fn lookup_mut<'a>(
        accounts: &'a mut BTreeMap<String, Ledger>,
        name: &str,
    ) -> LedgerResult<&'a mut Ledger> {
        let name = name.trim();
        accounts
            .get_mut(name)
            .ok_or_else(|| LedgerError::account_not_found(name))
    }

    fn save_accounts(&self) -> LedgerResult<()> {
        self.storage
            .accounts
            .save(&AccountData::from_ledgers(&self.accounts))
            .map_err(|e| {
                warn!(error = %e, "in-memory accounts are ahead of disk");
                e
            })
    }
}
