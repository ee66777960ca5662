//! Currency rate table
//!
//! Holds one exchange rate per ordered currency pair along with the date the
//! rate became effective. Rates are directional: registering USD -> EUR says
//! nothing about EUR -> USD.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// A registered rate and the first date it may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Units of the target currency per unit of the base currency
    pub rate: Decimal,
    /// Effective-from date
    pub date: NaiveDate,
}

/// Mapping of base currency -> target currency -> rate
///
/// Serializes to the nested object layout of `currency_rates.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyRateTable {
    rates: BTreeMap<CurrencyCode, BTreeMap<CurrencyCode, RateEntry>>,
}

impl CurrencyRateTable {
    /// Create an empty rate table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the rate for `base -> target`
    pub fn set_rate(
        &mut self,
        base: CurrencyCode,
        target: CurrencyCode,
        rate: Decimal,
        date: NaiveDate,
    ) -> LedgerResult<()> {
        if rate <= Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "Exchange rate must be positive, got {}",
                rate
            )));
        }

        if base == target {
            return Err(LedgerError::Validation(format!(
                "Cannot register a rate from {} to itself",
                base
            )));
        }

        self.rates
            .entry(base)
            .or_default()
            .insert(target, RateEntry { rate, date });
        Ok(())
    }

    /// Look up the rate for the ordered pair `base -> target`
    pub fn lookup(&self, base: &CurrencyCode, target: &CurrencyCode) -> LedgerResult<&RateEntry> {
        self.rates
            .get(base)
            .and_then(|targets| targets.get(target))
            .ok_or_else(|| LedgerError::RateNotFound {
                base: base.clone(),
                target: target.clone(),
            })
    }

    /// Convert an amount dated `on` from one currency into another
    ///
    /// Same-currency amounts pass through unchanged. A missing pair yields
    /// `ConversionUnavailable`; a rate that only takes effect after `on`
    /// yields `StaleRate`. A result outside the decimal range is
    /// `AmountOverflow`.
    pub fn convert(
        &self,
        amount: Money,
        from: &CurrencyCode,
        to: &CurrencyCode,
        on: NaiveDate,
    ) -> LedgerResult<Money> {
        if from == to {
            return Ok(amount);
        }

        let entry = self.lookup(from, to).map_err(|_| LedgerError::ConversionUnavailable {
            from: from.clone(),
            to: to.clone(),
        })?;

        if on < entry.date {
            return Err(LedgerError::StaleRate {
                from: from.clone(),
                to: to.clone(),
                transaction_date: on,
                effective_date: entry.date,
            });
        }

        amount
            .checked_convert(entry.rate)
            .ok_or(LedgerError::AmountOverflow {
                context: "currency conversion",
            })
    }

    /// Iterate over every registered `(base, target, entry)` triple
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &CurrencyCode, &RateEntry)> {
        self.rates.iter().flat_map(|(base, targets)| {
            targets
                .iter()
                .map(move |(target, entry)| (base, target, entry))
        })
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    /// Check if no rates are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_set_and_lookup() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("USD"), code("EUR"), dec!(0.9), date(2023, 1, 1))
            .unwrap();

        let entry = table.lookup(&code("USD"), &code("EUR")).unwrap();
        assert_eq!(entry.rate, dec!(0.9));
        assert_eq!(entry.date, date(2023, 1, 1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_is_directional() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("USD"), code("EUR"), dec!(0.9), date(2023, 1, 1))
            .unwrap();

        let err = table.lookup(&code("EUR"), &code("USD")).unwrap_err();
        assert!(matches!(err, LedgerError::RateNotFound { .. }));
    }

    #[test]
    fn test_no_transitive_lookup() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("GBP"), code("USD"), dec!(1.25), date(2023, 1, 1))
            .unwrap();
        table
            .set_rate(code("USD"), code("EUR"), dec!(0.9), date(2023, 1, 1))
            .unwrap();

        assert!(table.lookup(&code("GBP"), &code("EUR")).is_err());
    }

    #[test]
    fn test_last_write_wins() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("EUR"), code("USD"), dec!(1.1), date(2023, 1, 1))
            .unwrap();
        table
            .set_rate(code("EUR"), code("USD"), dec!(1.2), date(2023, 6, 1))
            .unwrap();

        let entry = table.lookup(&code("EUR"), &code("USD")).unwrap();
        assert_eq!(entry.rate, dec!(1.2));
        assert_eq!(entry.date, date(2023, 6, 1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rejects_invalid_rates() {
        let mut table = CurrencyRateTable::new();
        assert!(table
            .set_rate(code("EUR"), code("USD"), dec!(0), date(2023, 1, 1))
            .unwrap_err()
            .is_validation());
        assert!(table
            .set_rate(code("EUR"), code("USD"), dec!(-1), date(2023, 1, 1))
            .unwrap_err()
            .is_validation());
        assert!(table
            .set_rate(code("USD"), code("USD"), dec!(1), date(2023, 1, 1))
            .unwrap_err()
            .is_validation());
        assert!(table.is_empty());
    }

    #[test]
    fn test_convert() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("EUR"), code("USD"), dec!(1.1), date(2023, 1, 1))
            .unwrap();

        let converted = table
            .convert(Money::new(dec!(-100)), &code("EUR"), &code("USD"), date(2023, 1, 1))
            .unwrap();
        assert_eq!(converted, Money::new(dec!(-110)));

        let same = table
            .convert(Money::new(dec!(42)), &code("JPY"), &code("JPY"), date(2000, 1, 1))
            .unwrap();
        assert_eq!(same, Money::new(dec!(42)));
    }

    #[test]
    fn test_convert_before_effective_date_is_stale() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("EUR"), code("USD"), dec!(1.1), date(2023, 6, 1))
            .unwrap();

        let err = table
            .convert(Money::new(dec!(10)), &code("EUR"), &code("USD"), date(2023, 5, 31))
            .unwrap_err();
        assert!(matches!(err, LedgerError::StaleRate { .. }));
    }

    #[test]
    fn test_convert_missing_pair_is_unavailable() {
        let table = CurrencyRateTable::new();
        let err = table
            .convert(Money::new(dec!(10)), &code("EUR"), &code("USD"), date(2023, 5, 31))
            .unwrap_err();
        assert!(matches!(err, LedgerError::ConversionUnavailable { .. }));
    }

    #[test]
    fn test_convert_out_of_range() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("EUR"), code("USD"), dec!(2), date(2023, 1, 1))
            .unwrap();

        let err = table
            .convert(Money::new(Decimal::MAX), &code("EUR"), &code("USD"), date(2023, 2, 1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::AmountOverflow { .. }));
    }

    #[test]
    fn test_serialization_layout() {
        let json = r#"{"USD": {"EUR": {"rate": 0.9, "date": "2023-01-01"}}}"#;
        let table: CurrencyRateTable = serde_json::from_str(json).unwrap();
        let entry = table.lookup(&code("USD"), &code("EUR")).unwrap();
        assert_eq!(entry.rate, dec!(0.9));

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["USD"]["EUR"]["date"], "2023-01-01");
        assert_eq!(value["USD"]["EUR"]["rate"], 0.9);
    }

    #[test]
    fn test_iter_lists_all_pairs() {
        let mut table = CurrencyRateTable::new();
        table
            .set_rate(code("USD"), code("EUR"), dec!(0.9), date(2023, 1, 1))
            .unwrap();
        table
            .set_rate(code("EUR"), code("USD"), dec!(1.1), date(2023, 1, 1))
            .unwrap();

        let pairs: Vec<_> = table
            .iter()
            .map(|(b, t, _)| format!("{}->{}", b, t))
            .collect();
        assert_eq!(pairs, vec!["EUR->USD", "USD->EUR"]);
    }
}
