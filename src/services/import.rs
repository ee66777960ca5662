//! CSV import service
//!
//! Turns bank CSV exports into [`Transaction`]s ready for
//! [`AccountRegistry::import_transactions_to_account`](super::AccountRegistry::import_transactions_to_account).
//! The default layout is `Date,Description,Amount,Currency`; columns are
//! located by header name so their order does not matter.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CurrencyCode, Money, Transaction};

/// Column mapping configuration for CSV import
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Index of the date column
    pub date_column: usize,
    /// Index of the description column
    pub description_column: Option<usize>,
    /// Index of the amount column
    pub amount_column: usize,
    /// Index of the currency column; rows without one use the fallback currency
    pub currency_column: Option<usize>,
    /// Date format string (e.g., "%Y-%m-%d", "%m/%d/%Y")
    pub date_format: String,
    /// Whether the first row is a header
    pub has_header: bool,
    /// Delimiter character
    pub delimiter: u8,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            description_column: Some(1),
            amount_column: 2,
            currency_column: Some(3),
            date_format: "%Y-%m-%d".to_string(),
            has_header: true,
            delimiter: b',',
        }
    }
}

impl ColumnMapping {
    /// Create a new column mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date format
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Set whether first row is header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Locate columns from a header record
    ///
    /// Date, amount and description keep their defaults when no header names
    /// them; the currency column is only used when a header names it.
    pub fn detect_from_headers(mut self, headers: &StringRecord) -> Self {
        let mut currency_seen = false;

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();

            if h.contains("date") {
                self.date_column = idx;
            } else if h.contains("amount") || h == "value" {
                self.amount_column = idx;
            } else if h.contains("currency") || h == "ccy" {
                self.currency_column = Some(idx);
                currency_seen = true;
            } else if h.contains("description") || h.contains("payee") || h.contains("memo") {
                self.description_column = Some(idx);
            }
        }

        if !currency_seen {
            self.currency_column = None;
        }

        self
    }
}

/// A row that could not be turned into a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Data row number, 1-based, excluding the header
    pub row: usize,
    pub message: String,
}

/// Result of parsing a CSV file
#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    /// Successfully parsed transactions in file order
    pub transactions: Vec<Transaction>,
    /// Rows that were skipped
    pub errors: Vec<RowError>,
}

/// Parses CSV text into transactions
#[derive(Debug, Clone)]
pub struct CsvImporter {
    mapping: ColumnMapping,
    fallback_currency: CurrencyCode,
}

impl CsvImporter {
    /// Create an importer; `fallback_currency` fills rows with no currency
    pub fn new(mapping: ColumnMapping, fallback_currency: CurrencyCode) -> Self {
        Self {
            mapping,
            fallback_currency,
        }
    }

    /// Parse CSV content
    ///
    /// Malformed rows are collected in [`ParsedCsv::errors`] and skipped. Only
    /// a file the CSV reader cannot read at all is an error.
    pub fn parse(&self, content: &str) -> LedgerResult<ParsedCsv> {
        let mut reader = ReaderBuilder::new()
            .has_headers(self.mapping.has_header)
            .delimiter(self.mapping.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mapping = if self.mapping.has_header {
            let headers = reader
                .headers()
                .map_err(|e| LedgerError::Import(format!("Failed to read CSV header: {}", e)))?
                .clone();
            self.mapping.clone().detect_from_headers(&headers)
        } else {
            self.mapping.clone()
        };

        let mut parsed = ParsedCsv::default();
        for (idx, record) in reader.records().enumerate() {
            let row = idx + 1;
            let outcome = record
                .map_err(|e| format!("Error reading CSV record: {}", e))
                .and_then(|record| self.parse_record(&record, &mapping));

            match outcome {
                Ok(transaction) => parsed.transactions.push(transaction),
                Err(message) => parsed.errors.push(RowError { row, message }),
            }
        }

        Ok(parsed)
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        mapping: &ColumnMapping,
    ) -> Result<Transaction, String> {
        let date_str = record
            .get(mapping.date_column)
            .ok_or_else(|| "Missing date column".to_string())?;
        let date = parse_date(date_str, &mapping.date_format)?;

        let amount_str = record
            .get(mapping.amount_column)
            .ok_or_else(|| "Missing amount column".to_string())?;
        let amount = parse_amount_string(amount_str)?;

        let description = mapping
            .description_column
            .and_then(|col| record.get(col))
            .unwrap_or_default();

        let currency = match mapping.currency_column.and_then(|col| record.get(col)) {
            Some(code) if !code.is_empty() => {
                CurrencyCode::parse(code).map_err(|e| e.to_string())?
            }
            _ => self.fallback_currency.clone(),
        };

        Ok(Transaction::new(date, description, amount, currency))
    }
}

/// Parse a date string, trying the configured format before common alternatives
fn parse_date(s: &str, primary_format: &str) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, primary_format) {
        return Ok(date);
    }

    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("Could not parse date: '{}'", s))
}

/// Parse an amount, accepting accounting-style parentheses for negatives
fn parse_amount_string(s: &str) -> Result<Money, String> {
    let (negative, value) = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, s),
    };

    Money::parse(value)
        .map(|m| if negative { -m.abs() } else { m })
        .map_err(|e| format!("Could not parse amount '{}': {}", s, e))
}
