//! Ledger model
//!
//! A ledger is one account: its type, home currency, optional credit limit,
//! and the ordered list of transactions posted to it. The balance is always
//! derived by converting every transaction into the home currency and
//! summing, so it can never drift from the transaction list. A ledger
//! restored from disk whose history no longer converts has no balance until
//! a usable rate is registered.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::account::{AccountType, AccountValidationError};
use super::currency::CurrencyCode;
use super::money::Money;
use super::rate::CurrencyRateTable;
use super::transaction::Transaction;
use crate::error::{LedgerError, LedgerResult, PolicyViolation};

/// A transaction that an import refused, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTransaction {
    /// Position of the transaction in the imported batch
    pub index: usize,
    pub transaction: Transaction,
    pub violation: PolicyViolation,
}

/// Result of importing a batch of transactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Number of transactions posted
    pub accepted: usize,
    /// Transactions refused by the balance policy, in batch order
    pub rejected: Vec<RejectedTransaction>,
}

impl ImportOutcome {
    /// Check if every transaction in the batch was posted
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Per-account record of transactions and derived balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    account_type: AccountType,
    currency: CurrencyCode,
    credit_limit: Option<Money>,
    transactions: Vec<Transaction>,
    balance: Option<Money>,
}

impl Ledger {
    /// Create an empty ledger
    ///
    /// A credit account without a limit is held to a limit of zero.
    pub fn new(
        account_type: AccountType,
        currency: CurrencyCode,
        credit_limit: Option<Money>,
    ) -> LedgerResult<Self> {
        if credit_limit.is_some_and(|limit| limit.is_negative()) {
            return Err(LedgerError::Validation(
                AccountValidationError::NegativeCreditLimit.to_string(),
            ));
        }

        Ok(Self {
            account_type,
            currency,
            credit_limit,
            transactions: Vec::new(),
            balance: Some(Money::zero()),
        })
    }

    /// Rebuild a ledger from persisted transactions
    ///
    /// The transactions were accepted when they were written, so the balance
    /// policy is not re-applied; the balance is recomputed against `rates`.
    /// If that fails (a rate was moved to a later effective date, say) the
    /// transactions are still kept and the balance is left unavailable.
    pub fn restore(
        account_type: AccountType,
        currency: CurrencyCode,
        credit_limit: Option<Money>,
        transactions: Vec<Transaction>,
        rates: &CurrencyRateTable,
    ) -> LedgerResult<Self> {
        let mut ledger = Self::new(account_type, currency, credit_limit)?;
        ledger.transactions = transactions;
        ledger.balance = None;
        ledger.refresh_balance(rates);

        if let Some(Err(violation)) = ledger.balance.map(|b| ledger.check_policy(b)) {
            warn!(%violation, "restored ledger is outside its balance policy");
        }

        Ok(ledger)
    }

    /// Retry computing an unavailable balance
    ///
    /// Returns whether a balance is available afterwards.
    pub fn refresh_balance(&mut self, rates: &CurrencyRateTable) -> bool {
        if self.balance.is_some() {
            return true;
        }

        match self.compute_balance(rates) {
            Ok(balance) => {
                self.balance = Some(balance);
                true
            }
            Err(error) => {
                warn!(%error, "balance unavailable until a usable rate is registered");
                false
            }
        }
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Home currency the balance is denominated in
    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Credit limit as configured (may be absent)
    pub fn credit_limit(&self) -> Option<Money> {
        self.credit_limit
    }

    /// Balance in the home currency as of the last successful computation
    ///
    /// `None` when the ledger was restored with a history that could not be
    /// converted; see [`Ledger::current_balance`] for the reason.
    pub fn balance(&self) -> Option<Money> {
        self.balance
    }

    /// Current balance, or the error that keeps it from being computed
    pub fn current_balance(&self, rates: &CurrencyRateTable) -> LedgerResult<Money> {
        match self.balance {
            Some(balance) => Ok(balance),
            None => self.compute_balance(rates),
        }
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Post a transaction and return the new balance
    ///
    /// The balance is recomputed over the whole sequence including the new
    /// transaction. The transaction is rejected, leaving the ledger untouched,
    /// when that balance breaks the account's policy, when some amount
    /// cannot be converted into the home currency, or when the total leaves
    /// the decimal range.
    pub fn add_transaction(
        &mut self,
        transaction: Transaction,
        rates: &CurrencyRateTable,
    ) -> LedgerResult<Money> {
        self.post(transaction, rates).map_err(|(_, err)| err)
    }

    /// Post each transaction in order
    ///
    /// Policy rejections are collected and the batch continues. A conversion
    /// failure stops the batch; transactions accepted before it stay posted.
    pub fn import_transactions<I>(
        &mut self,
        transactions: I,
        rates: &CurrencyRateTable,
    ) -> LedgerResult<ImportOutcome>
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut outcome = ImportOutcome::default();

        for (index, transaction) in transactions.into_iter().enumerate() {
            match self.post(transaction, rates) {
                Ok(_) => outcome.accepted += 1,
                Err((transaction, LedgerError::Policy(violation))) => {
                    outcome.rejected.push(RejectedTransaction {
                        index,
                        transaction,
                        violation,
                    });
                }
                Err((_, err)) => return Err(err),
            }
        }

        Ok(outcome)
    }

    /// Balance in the home currency counting only transactions on or before `date`
    pub fn balance_as_of(&self, date: NaiveDate, rates: &CurrencyRateTable) -> LedgerResult<Money> {
        checked_total(
            self.transactions
                .iter()
                .filter(|t| t.date() <= date)
                .map(|t| self.to_home_currency(t, rates)),
            "balance",
        )
    }

    /// Raw sum of amounts on or before `date`, ignoring currencies
    pub fn nominal_total_as_of(&self, date: NaiveDate) -> LedgerResult<Money> {
        checked_total(
            self.transactions
                .iter()
                .filter(|t| t.date() <= date)
                .map(|t| Ok(t.amount())),
            "nominal total",
        )
    }

    /// Transactions dated within `start..=end`, in insertion order
    pub fn transactions_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.is_within(start, end))
            .collect()
    }

    /// Recompute the balance as if `transaction` were appended and post it
    /// only if the result is valid; on failure the transaction is handed back
    /// with the error and the ledger is left as it was
    fn post(
        &mut self,
        transaction: Transaction,
        rates: &CurrencyRateTable,
    ) -> Result<Money, (Transaction, LedgerError)> {
        let outcome = self
            .balance_with(Some(&transaction), rates)
            .and_then(|balance| self.check_policy(balance).map(|_| balance).map_err(Into::into));

        match outcome {
            Ok(balance) => {
                self.transactions.push(transaction);
                self.balance = Some(balance);
                debug!(
                    transactions = self.transactions.len(),
                    %balance,
                    "balance recomputed"
                );
                Ok(balance)
            }
            Err(err) => {
                warn!(
                    date = %transaction.date(),
                    description = transaction.description(),
                    error = %err,
                    "transaction rejected"
                );
                Err((transaction, err))
            }
        }
    }

    fn compute_balance(&self, rates: &CurrencyRateTable) -> LedgerResult<Money> {
        self.balance_with(None, rates)
    }

    fn balance_with(
        &self,
        candidate: Option<&Transaction>,
        rates: &CurrencyRateTable,
    ) -> LedgerResult<Money> {
        checked_total(
            self.transactions
                .iter()
                .chain(candidate)
                .map(|t| self.to_home_currency(t, rates)),
            "balance",
        )
    }

    fn to_home_currency(&self, transaction: &Transaction, rates: &CurrencyRateTable) -> LedgerResult<Money> {
        rates.convert(
            transaction.amount(),
            transaction.currency(),
            &self.currency,
            transaction.date(),
        )
    }

    fn check_policy(&self, balance: Money) -> Result<(), PolicyViolation> {
        match self.account_type {
            AccountType::Debit if balance.is_negative() => {
                Err(PolicyViolation::NegativeDebitBalance { balance })
            }
            AccountType::Credit => {
                let limit = self.credit_limit.unwrap_or_default();
                if balance < -limit {
                    Err(PolicyViolation::CreditLimitExceeded { balance, limit })
                } else {
                    Ok(())
                }
            }
            AccountType::Debit => Ok(()),
        }
    }
}

/// Sum amounts, failing on the first error or on overflow
fn checked_total<I>(amounts: I, context: &'static str) -> LedgerResult<Money>
where
    I: IntoIterator<Item = LedgerResult<Money>>,
{
    amounts.into_iter().try_fold(Money::zero(), |total, amount| {
        total
            .checked_add(amount?)
            .ok_or(LedgerError::AmountOverflow { context })
    })
}
