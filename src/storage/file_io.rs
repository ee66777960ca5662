//! File I/O utilities
//!
//! JSON helpers shared by the account and rate stores. A missing file reads
//! as the type's default. Writes land in a `.json.tmp` sibling that is synced
//! and then renamed over the target, so the previous file survives a crash.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::LedgerError;

fn persistence_error(action: &str, path: &Path, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Persistence(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON data file, or `T::default()` if it has not been written yet
pub fn read_json<T, P>(path: P) -> Result<T, LedgerError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(persistence_error("read", path, e)),
    };

    serde_json::from_str(&contents).map_err(|e| persistence_error("parse", path, e))
}

/// Replace a JSON data file with the pretty-printed form of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes =
        serde_json::to_vec_pretty(data).map_err(|e| persistence_error("serialize", path, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| persistence_error("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });

    if let Err(e) = written.and_then(|_| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(persistence_error("write", path, e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrencyCode, CurrencyRateTable};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn sample_rates() -> CurrencyRateTable {
        let mut rates = CurrencyRateTable::new();
        rates
            .set_rate(
                CurrencyCode::parse("GBP").unwrap(),
                CurrencyCode::parse("USD").unwrap(),
                dec!(1.25),
                NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            )
            .unwrap();
        rates
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let rates: CurrencyRateTable = read_json(temp_dir.path().join("absent.json")).unwrap();
        assert!(rates.is_empty());
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("currency_rates.json");

        write_json_atomic(&path, &sample_rates()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let loaded: CurrencyRateTable = read_json(&path).unwrap();
        assert_eq!(loaded, sample_rates());
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("currency_rates.json");

        write_json_atomic(&path, &sample_rates()).unwrap();
        write_json_atomic(&path, &CurrencyRateTable::new()).unwrap();

        let loaded: CurrencyRateTable = read_json(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("currency_rates.json");
        fs::write(&path, "{ \"USD\": ").unwrap();

        let err = read_json::<CurrencyRateTable, _>(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(msg) if msg.contains("parse")));
    }
}
