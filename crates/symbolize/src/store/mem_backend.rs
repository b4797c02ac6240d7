use super::backend::{RecordBackend, StoredRecord};
use crate::error::{Result, SymbolizeError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since stores are used from one
/// thread. This keeps the `RecordBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    tables: RefCell<HashMap<String, Vec<StoredRecord>>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl RecordBackend for MemBackend {
    fn load(&self, model: &str) -> Result<Vec<StoredRecord>> {
        let tables = self.tables.borrow();
        Ok(tables.get(model).cloned().unwrap_or_default())
    }

    fn save(&self, model: &str, records: &[StoredRecord]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SymbolizeError::Store("Simulated write error".to_string()));
        }
        let mut tables = self.tables.borrow_mut();
        tables.insert(model.to_string(), records.to_vec());
        Ok(())
    }
}
