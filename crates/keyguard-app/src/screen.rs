//! Render-facing lock screen view model.
//!
//! [`LockScreen`] is the subset of lock state a frontend needs to draw the
//! screen: labels, placeholder fill, and button visibility. Drivers render
//! from this projection instead of reaching into the lock, keeping the
//! render path identical in production and simulation.

use keyguard_core::{PasscodeLock, PasscodeStore};

/// Snapshot of everything a frontend draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockScreen {
    /// Title label text.
    pub title: &'static str,
    /// Description label text.
    pub prompt: &'static str,
    /// Number of filled sign placeholders.
    pub filled: usize,
    /// Total number of sign placeholders.
    pub capacity: usize,
    /// Whether the cancel button is visible.
    pub can_cancel: bool,
    /// Whether the biometrics button is visible.
    pub show_biometrics: bool,
}

impl LockScreen {
    /// Project the current state of `lock`.
    #[must_use]
    pub fn project<S: PasscodeStore>(lock: &PasscodeLock<S>) -> Self {
        let state = lock.state();

        Self {
            title: state.title(),
            prompt: state.prompt(),
            filled: lock.entered_len(),
            capacity: lock.config().passcode_length.get(),
            can_cancel: state.is_cancellable(),
            show_biometrics: lock.biometrics_allowed(),
        }
    }

    /// True if every sign placeholder is filled.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.filled == self.capacity
    }
}
