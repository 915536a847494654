//! Shared in-memory passcode store.

use std::sync::{Arc, Mutex};

use keyguard_core::{Passcode, PasscodeStore, StoreError};

/// In-memory passcode store.
///
/// Clones share the same underlying record via `Arc`, so a lock and the
/// driving test observe one consistent store. Nothing is persisted; intended
/// for tests, simulation, and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Record>>,
}

#[derive(Debug, Default)]
struct Record {
    passcode: Option<Passcode>,
    failed_attempts: u32,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `code`.
    #[must_use]
    pub fn with_passcode(code: Passcode) -> Self {
        let store = Self::default();
        if let Ok(mut record) = store.inner.lock() {
            record.passcode = Some(code);
        }
        store
    }

    fn with_record<T>(&self, f: impl FnOnce(&mut Record) -> T) -> Result<T, StoreError> {
        self.inner
            .lock()
            .map(|mut record| f(&mut record))
            .map_err(|_| StoreError::Io("store mutex poisoned".to_string()))
    }
}

impl PasscodeStore for MemoryStore {
    fn passcode(&self) -> Result<Option<Passcode>, StoreError> {
        self.with_record(|record| record.passcode.clone())
    }

    fn set_passcode(&self, code: &Passcode) -> Result<(), StoreError> {
        self.with_record(|record| record.passcode = Some(code.clone()))
    }

    fn delete_passcode(&self) -> Result<(), StoreError> {
        self.with_record(|record| record.passcode = None)
    }

    fn failed_attempts(&self) -> Result<u32, StoreError> {
        self.with_record(|record| record.failed_attempts)
    }

    fn record_failed_attempt(&self) -> Result<u32, StoreError> {
        self.with_record(|record| {
            record.failed_attempts += 1;
            record.failed_attempts
        })
    }

    fn reset_failed_attempts(&self) -> Result<(), StoreError> {
        self.with_record(|record| record.failed_attempts = 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(digits: &str) -> Passcode {
        Passcode::parse(digits).expect("test digits must parse")
    }

    #[test]
    fn clones_share_the_record() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.set_passcode(&code("1234")).expect("set");
        assert_eq!(clone.passcode().expect("read"), Some(code("1234")));

        clone.delete_passcode().expect("delete");
        assert_eq!(store.passcode().expect("read"), None);
    }

    #[test]
    fn attempt_counter_round_trip() {
        let store = MemoryStore::new();

        assert_eq!(store.failed_attempts().expect("read"), 0);
        assert_eq!(store.record_failed_attempt().expect("record"), 1);
        assert_eq!(store.record_failed_attempt().expect("record"), 2);

        store.reset_failed_attempts().expect("reset");
        assert_eq!(store.failed_attempts().expect("read"), 0);
    }

    #[test]
    fn deleting_keeps_the_attempt_counter() {
        let store = MemoryStore::with_passcode(code("9876"));
        let _ = store.record_failed_attempt().expect("record");

        store.delete_passcode().expect("delete");

        assert!(!store.has_passcode().expect("read"));
        assert_eq!(store.failed_attempts().expect("read"), 1);
    }
}
