//! Integration test framework for freeslot
//!
//! Provides a scratch directory with a record file so tests can push free
//! slot pages through storage and back.

use freeslot::common::test_utils::init_test_logging;
use freeslot::common::{Error, Result};
use freeslot::storage::record::Record;
use freeslot::storage::record_io::{read_record, write_record_sync};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Integration test environment
pub struct TestEnvironment {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
    /// Record file path within temp directory
    pub db_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment
    pub fn new() -> Result<Self> {
        init_test_logging();

        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("records.db");

        Ok(Self { temp_dir, db_path })
    }

    /// Get the record file path
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open the record file, creating it when missing
    pub fn open(&self) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.db_path)
            .map_err(|e| Error::io(format!("Failed to open record file: {e}")))
    }

    /// Persist a record durably
    pub fn store(&self, record: &mut Record) -> Result<()> {
        let mut file = self.open()?;
        write_record_sync(&mut file, record)
    }

    /// Load a record back from the file
    pub fn load(&self, id: u64, record_size: usize) -> Result<Record> {
        let mut file = self.open()?;
        read_record(&mut file, id, record_size)
    }
}

/// Helper for testing error conditions
pub struct ErrorTester;

impl ErrorTester {
    /// Test that a function returns a specific error type
    pub fn assert_error_type<T: std::fmt::Debug, F>(func: F, expected_predicate: fn(&Error) -> bool)
    where
        F: FnOnce() -> Result<T>,
    {
        let result = func();
        assert!(result.is_err(), "Expected error, got success");

        let error = result.unwrap_err();
        assert!(
            expected_predicate(&error),
            "Error type mismatch. Got: {:?}",
            error
        );
    }

    /// Test that a function returns a corruption error
    pub fn assert_corruption_error<T: std::fmt::Debug, F>(func: F)
    where
        F: FnOnce() -> Result<T>,
    {
        Self::assert_error_type(func, |e| e.is_corruption());
    }

    /// Test that a function breaks the vacant/in-use row contract
    pub fn assert_contract_violation<T: std::fmt::Debug, F>(func: F)
    where
        F: FnOnce() -> Result<T>,
    {
        Self::assert_error_type(func, |e| e.is_contract_violation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_creation() {
        let env = TestEnvironment::new().expect("Should create test environment");

        assert!(env.temp_dir.path().is_dir());
        assert_eq!(env.db_path().file_name().unwrap(), "records.db");
    }

    #[test]
    fn test_store_and_load() {
        let env = TestEnvironment::new().expect("Should create test environment");

        let mut record = Record::new(4, 64);
        record.write_u32(8, 99);
        env.store(&mut record).expect("Should store record");

        let loaded = env.load(4, 64).expect("Should load record");
        assert_eq!(loaded.read_u32(8), 99);
    }

    #[test]
    fn test_error_tester() {
        ErrorTester::assert_corruption_error(|| -> Result<()> {
            Err(Error::corruption("Test corruption"))
        });
        ErrorTester::assert_contract_violation(|| -> Result<()> { Err(Error::SlotVacant(1)) });
    }
}
