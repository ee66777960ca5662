//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.

pub mod account;
pub mod rate;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use rate::format_rate_table;
pub use transaction::{format_transaction_register, format_transaction_row};
