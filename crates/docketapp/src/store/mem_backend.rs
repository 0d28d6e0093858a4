use super::backend::StorageBackend;
use crate::error::{DocketError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since docket is single-threaded,
/// which keeps every `StorageBackend` method on `&self`.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation (storage unavailable).
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// Test helper to plant a raw blob, bypassing error simulation.
    pub fn insert_raw(&self, key: &str, content: &str) {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), content.to_string());
    }

    /// Test helper to inspect a raw blob.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(DocketError::Store("Simulated read error".to_string()));
        }
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(DocketError::Store("Simulated write error".to_string()));
        }
        self.insert_raw(key, content);
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        format!("memory://{}", key)
    }
}
