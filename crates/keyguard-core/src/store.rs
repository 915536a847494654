//! Repository contract for the persisted passcode record.
//!
//! The core never touches persistence directly: the stored code and the
//! failed-attempt counter live behind [`PasscodeStore`]. The trait is
//! synchronous (no async) to keep the state machine sans-IO.

use thiserror::Error;

use crate::sign::Passcode;

/// Errors that can occur during store operations.
///
/// Payloads are strings rather than source errors so the type stays
/// `Clone + PartialEq` for state-machine tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Serialization or deserialization of the stored record failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Underlying persistence failed (file system, keychain, database).
    #[error("I/O error: {0}")]
    Io(String),
}

/// Persistence contract for the stored passcode and attempt counter.
///
/// This trait must be:
/// - Clone: Can be passed to multiple locks
/// - Send + Sync: Thread-safe for concurrent access
/// - Synchronous: No async methods (sans-IO compliance)
///
/// # Clone Semantics
///
/// Implementations typically share internal state via Arc, meaning clones
/// access the same underlying record. This lets a lock and its driving UI
/// observe one consistent store.
pub trait PasscodeStore: Clone + Send + Sync + 'static {
    /// True if a passcode is currently stored.
    ///
    /// # Errors
    ///
    /// Returns the underlying store error if the record cannot be read.
    fn has_passcode(&self) -> Result<bool, StoreError> {
        self.passcode().map(|code| code.is_some())
    }

    /// The stored passcode. `None` if none has been set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the record cannot be read and
    /// `StoreError::Serialization` if it cannot be decoded.
    fn passcode(&self) -> Result<Option<Passcode>, StoreError>;

    /// Persist `code`, replacing any existing passcode.
    ///
    /// # Invariants
    ///
    /// - **Post**: all-or-nothing; on error the previous record is intact
    ///   and the caller must not report the flow as succeeded.
    fn set_passcode(&self, code: &Passcode) -> Result<(), StoreError>;

    /// Remove the stored passcode. The attempt counter is untouched.
    fn delete_passcode(&self) -> Result<(), StoreError>;

    /// Current failed-attempt count.
    fn failed_attempts(&self) -> Result<u32, StoreError>;

    /// Increment the failed-attempt count and return the new total.
    fn record_failed_attempt(&self) -> Result<u32, StoreError>;

    /// Reset the failed-attempt count to zero.
    fn reset_failed_attempts(&self) -> Result<(), StoreError>;
}
