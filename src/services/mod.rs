//! Service layer for the bank ledger
//!
//! The service layer provides business logic on top of the models and the
//! storage layer: the account registry and CSV import.

pub mod import;
pub mod registry;

pub use import::{ColumnMapping, CsvImporter, ParsedCsv, RowError};
pub use registry::AccountRegistry;
