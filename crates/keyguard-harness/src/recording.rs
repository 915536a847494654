//! Observer that records every notification for assertions.

use std::sync::{Arc, Mutex};

use keyguard_core::{LockObserver, LockState, Passcode, StateKind};

/// One captured observer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// `on_succeeded` fired.
    Succeeded,
    /// `on_succeeded_with_code` fired with this code.
    SucceededWithCode(Passcode),
    /// `on_failed` fired.
    Failed,
    /// `on_state_changed` fired; the new state's kind.
    StateChanged(StateKind),
    /// `on_sign_added` fired at this index.
    SignAdded(usize),
    /// `on_sign_removed` fired at this index.
    SignRemoved(usize),
    /// `on_attempts_exceeded` fired at this total.
    AttemptsExceeded(u32),
    /// `on_cancelled` fired.
    Cancelled,
    /// `on_biometrics_denied` fired.
    BiometricsDenied,
    /// `on_biometrics_unavailable` fired.
    BiometricsUnavailable,
}

/// Observer capturing every notification in arrival order.
///
/// Register with [`keyguard_core::PasscodeLock::set_observer`] via
/// `Arc::downgrade`; keep the `Arc` alive for the duration of the test.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingObserver {
    /// Create a recording observer behind an `Arc`, ready to downgrade.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of all captured notifications, in order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().map(|captured| captured.clone()).unwrap_or_default()
    }

    /// Number of captured notifications matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&Notification) -> bool) -> usize {
        self.notifications().iter().filter(|n| predicate(n)).count()
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut captured) = self.notifications.lock() {
            captured.push(notification);
        }
    }
}

impl LockObserver for RecordingObserver {
    fn on_succeeded(&self) {
        self.push(Notification::Succeeded);
    }

    fn on_succeeded_with_code(&self, code: &Passcode) {
        self.push(Notification::SucceededWithCode(code.clone()));
    }

    fn on_failed(&self) {
        self.push(Notification::Failed);
    }

    fn on_state_changed(&self, state: &LockState) {
        self.push(Notification::StateChanged(state.kind()));
    }

    fn on_sign_added(&self, index: usize) {
        self.push(Notification::SignAdded(index));
    }

    fn on_sign_removed(&self, index: usize) {
        self.push(Notification::SignRemoved(index));
    }

    fn on_attempts_exceeded(&self, attempts: u32) {
        self.push(Notification::AttemptsExceeded(attempts));
    }

    fn on_cancelled(&self) {
        self.push(Notification::Cancelled);
    }

    fn on_biometrics_denied(&self) {
        self.push(Notification::BiometricsDenied);
    }

    fn on_biometrics_unavailable(&self) {
        self.push(Notification::BiometricsUnavailable);
    }
}
