//! Events produced by the passcode lock.
//!
//! Every mutating operation on [`crate::PasscodeLock`] returns the events it
//! produced, and the same events are pushed to the registered
//! [`crate::LockObserver`]. The driver executes instruction-style events
//! (currently only [`LockEvent::BiometricPromptRequested`]); the rest are
//! notifications for the UI.

use crate::sign::Passcode;

/// Events produced by the lock state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockEvent {
    /// A sign was appended to the entry buffer.
    SignAdded {
        /// Zero-based position of the appended sign.
        index: usize,
    },

    /// The last sign was removed from the entry buffer.
    SignRemoved {
        /// Zero-based position the removed sign occupied.
        index: usize,
    },

    /// The active state was replaced; the entry buffer was cleared.
    StateChanged,

    /// The flow completed successfully.
    Succeeded,

    /// The flow completed successfully and produced a code.
    ///
    /// Follows [`LockEvent::Succeeded`] whenever the success verified or
    /// established a concrete code (enter match, confirm match). Remove and
    /// biometric successes emit no code.
    SucceededWithCode {
        /// The verified or newly established passcode.
        code: Passcode,
    },

    /// The entered code did not match; the entry buffer was cleared.
    Failed,

    /// Failed attempts crossed the configured allowance.
    ///
    /// Fires exactly once at the crossing point, not on every subsequent
    /// failure. A successful entry resets the counter and re-arms it.
    AttemptsExceeded {
        /// Failed-attempt total at the crossing.
        attempts: u32,
    },

    /// A cancellable flow was cancelled; the entry buffer was cleared.
    Cancelled,

    /// Instruction for the driver: run the platform biometric prompt.
    BiometricPromptRequested {
        /// User-facing reason to display in the prompt.
        reason: String,
    },

    /// The user dismissed or failed the biometric prompt.
    ///
    /// Distinct from a wrong code: never counted against the retry
    /// allowance and never reported as [`LockEvent::Failed`].
    BiometricsDenied,

    /// Biometric authentication is not available for the current state or
    /// configuration, or no sensor is present.
    BiometricsUnavailable,
}
