//! Observer contract and the non-owning observer slot.
//!
//! The UI layer registers a single observer to receive push notifications of
//! lock activity. The slot holds a [`Weak`] reference so the lock never
//! extends the UI's lifetime; a dropped observer is skipped silently.

use std::sync::Weak;

use crate::{event::LockEvent, sign::Passcode, state::LockState};

/// Push-notification contract for the UI layer.
///
/// All methods default to no-ops so observers implement only what they
/// render. Methods take `&self`; observers needing mutation use interior
/// mutability.
pub trait LockObserver: Send + Sync {
    /// The flow completed successfully.
    fn on_succeeded(&self) {}

    /// The flow completed successfully and produced `code`.
    fn on_succeeded_with_code(&self, code: &Passcode) {
        let _ = code;
    }

    /// The entered code did not match.
    fn on_failed(&self) {}

    /// The active state was replaced; `state` is the new state.
    fn on_state_changed(&self, state: &LockState) {
        let _ = state;
    }

    /// A sign was appended at `index`.
    fn on_sign_added(&self, index: usize) {
        let _ = index;
    }

    /// The sign at `index` was removed.
    fn on_sign_removed(&self, index: usize) {
        let _ = index;
    }

    /// Failed attempts crossed the configured allowance.
    fn on_attempts_exceeded(&self, attempts: u32) {
        let _ = attempts;
    }

    /// A cancellable flow was cancelled.
    fn on_cancelled(&self) {}

    /// The user dismissed or failed the biometric prompt.
    fn on_biometrics_denied(&self) {}

    /// Biometric authentication was requested but is not available.
    fn on_biometrics_unavailable(&self) {}
}

/// Single-slot, non-owning observer registration.
#[derive(Debug, Clone, Default)]
pub(crate) struct ObserverSlot {
    slot: Option<Weak<dyn LockObserver>>,
}

impl ObserverSlot {
    pub fn set(&mut self, observer: Weak<dyn LockObserver>) {
        self.slot = Some(observer);
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Forward `events` to the observer if it is still alive.
    ///
    /// [`LockEvent::BiometricPromptRequested`] is an instruction for the
    /// driver, not a notification, and is not forwarded.
    pub fn dispatch(&self, state: &LockState, events: &[LockEvent]) {
        let Some(observer) = self.slot.as_ref().and_then(Weak::upgrade) else {
            return;
        };

        for event in events {
            match event {
                LockEvent::SignAdded { index } => observer.on_sign_added(*index),
                LockEvent::SignRemoved { index } => observer.on_sign_removed(*index),
                LockEvent::StateChanged => observer.on_state_changed(state),
                LockEvent::Succeeded => observer.on_succeeded(),
                LockEvent::SucceededWithCode { code } => observer.on_succeeded_with_code(code),
                LockEvent::Failed => observer.on_failed(),
                LockEvent::AttemptsExceeded { attempts } => {
                    observer.on_attempts_exceeded(*attempts);
                },
                LockEvent::Cancelled => observer.on_cancelled(),
                LockEvent::BiometricsDenied => observer.on_biometrics_denied(),
                LockEvent::BiometricsUnavailable => observer.on_biometrics_unavailable(),
                LockEvent::BiometricPromptRequested { .. } => {},
            }
        }
    }
}
