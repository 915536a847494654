//! Error types for the passcode lock core.
//!
//! Wrong codes, cancelled flows, and biometric denials are *not* errors:
//! they are expected domain outcomes surfaced as [`crate::LockEvent`]s.
//! `LockError` covers the conditions that indicate either a bug in the
//! driving UI (invariant violations) or an environmental failure (store
//! errors) and must not be silently absorbed.

use thiserror::Error;

use crate::{state::StateKind, store::StoreError};

/// Errors that can occur during passcode lock operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    /// Appended a sign to a buffer that already holds a complete code.
    #[error("sign buffer full: capacity {capacity}")]
    BufferFull {
        /// Configured passcode length.
        capacity: usize,
    },

    /// Removed a sign from an empty buffer.
    #[error("sign buffer empty: nothing to remove")]
    BufferEmpty,

    /// Cancelled a flow whose active state does not allow cancellation.
    #[error("cannot cancel from state {state:?}")]
    NotCancellable {
        /// Active state when cancellation was attempted.
        state: StateKind,
    },

    /// A verify flow ran against a store holding no passcode.
    #[error("no stored passcode to verify against")]
    NoStoredPasscode,

    /// The store rejected or failed a persistence operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LockError {
    /// Returns true if this error indicates a bug in the driving UI rather
    /// than an environmental failure.
    ///
    /// Invariant violations should never occur when the UI enforces the
    /// configured length limits and state capabilities; a runtime may log
    /// and continue past them. Store errors are environmental and abort the
    /// flow instead.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::BufferFull { .. }
                | Self::BufferEmpty
                | Self::NotCancellable { .. }
                | Self::NoStoredPasscode
        )
    }
}
