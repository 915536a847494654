//! The passcode lock orchestrator.
//!
//! [`PasscodeLock`] owns the active [`LockState`], the [`SignBuffer`], the
//! [`LockConfig`], and a handle to the [`PasscodeStore`]. It dispatches
//! sign-add/remove input to the active state, applies state transitions
//! atomically, and surfaces the resulting [`LockEvent`]s both as return
//! values and through the registered observer.

use std::sync::Weak;

use crate::{
    biometrics::BiometricVerdict,
    config::LockConfig,
    error::LockError,
    event::LockEvent,
    observer::{LockObserver, ObserverSlot},
    sign::{Sign, SignBuffer},
    state::{LockMode, LockState, Verdict},
    store::PasscodeStore,
};

/// User-facing reason displayed by the platform biometric prompt.
const BIOMETRIC_PROMPT_REASON: &str = "Unlock with your passcode alternative";

/// Passcode lock state machine orchestrator.
///
/// Holds exactly one active state at a time; replacing it clears the entry
/// buffer, so a transition is atomic from the caller's perspective. All
/// operations are synchronous and must be driven from a single logical
/// thread (see the runtime in `keyguard-app` for the async biometric
/// marshalling).
#[derive(Debug, Clone)]
pub struct PasscodeLock<S: PasscodeStore> {
    state: LockState,
    buffer: SignBuffer,
    config: LockConfig,
    store: S,
    observer: ObserverSlot,
}

impl<S: PasscodeStore> PasscodeLock<S> {
    /// Create a lock in the initial state of `mode`.
    pub fn new(mode: LockMode, config: LockConfig, store: S) -> Self {
        Self::with_initial_state(mode.initial_state(), config, store)
    }

    /// Create a lock starting from an explicit state.
    ///
    /// [`PasscodeLock::new`] covers the standard flows; this constructor is
    /// for variants the modes do not express, such as a dismissable verify
    /// screen (`EnterPasscode { allow_cancellation: true }`).
    pub fn with_initial_state(state: LockState, config: LockConfig, store: S) -> Self {
        Self {
            state,
            buffer: SignBuffer::new(config.passcode_length),
            config,
            store,
            observer: ObserverSlot::default(),
        }
    }

    /// Append a sign to the entry buffer.
    ///
    /// When the buffer reaches the configured length, the active state
    /// evaluates the code exactly once: a match succeeds or transitions, a
    /// mismatch records a failed attempt and clears the buffer.
    ///
    /// # Errors
    ///
    /// - `LockError::BufferFull` if a complete code is already entered
    /// - `LockError::NoStoredPasscode` if a verify flow has no stored code
    /// - `LockError::Store` if the store fails; never reported as success
    pub fn add_sign(&mut self, sign: Sign) -> Result<Vec<LockEvent>, LockError> {
        let index = self.buffer.append(sign)?;
        let mut events = vec![LockEvent::SignAdded { index }];

        if self.buffer.is_full() {
            let entered = self.buffer.as_code();
            let verdict = self.state.accept_code(&entered, &self.store, &self.config)?;
            self.apply(verdict, &mut events);
        }

        self.observer.dispatch(&self.state, &events);
        Ok(events)
    }

    /// Remove the last entered sign.
    ///
    /// # Errors
    ///
    /// - `LockError::BufferEmpty` if no sign has been entered
    pub fn remove_sign(&mut self) -> Result<Vec<LockEvent>, LockError> {
        let index = self.buffer.remove()?;
        let events = vec![LockEvent::SignRemoved { index }];

        self.observer.dispatch(&self.state, &events);
        Ok(events)
    }

    /// Abort a cancellable flow without mutating the store.
    ///
    /// # Errors
    ///
    /// - `LockError::NotCancellable` if the active state forbids it
    pub fn cancel(&mut self) -> Result<Vec<LockEvent>, LockError> {
        if !self.state.is_cancellable() {
            return Err(LockError::NotCancellable { state: self.state.kind() });
        }

        self.buffer.clear();
        let events = vec![LockEvent::Cancelled];

        self.observer.dispatch(&self.state, &events);
        Ok(events)
    }

    /// Request biometric authentication.
    ///
    /// Emits [`LockEvent::BiometricPromptRequested`] for the driver to
    /// execute when the configuration and the active state permit
    /// biometrics, [`LockEvent::BiometricsUnavailable`] otherwise. The
    /// prompt outcome is delivered back via
    /// [`PasscodeLock::resolve_biometrics`].
    pub fn request_biometrics(&mut self) -> Vec<LockEvent> {
        let events = if self.biometrics_allowed() {
            vec![LockEvent::BiometricPromptRequested {
                reason: BIOMETRIC_PROMPT_REASON.to_string(),
            }]
        } else {
            vec![LockEvent::BiometricsUnavailable]
        };

        self.observer.dispatch(&self.state, &events);
        events
    }

    /// Apply the outcome of a finished biometric prompt.
    ///
    /// Approval synthesizes the success path of a correct code entry for
    /// the active state, bypassing the buffer and leaving the attempt
    /// counter untouched. Denial is not a failure: no counter increment, no
    /// [`LockEvent::Failed`].
    ///
    /// # Errors
    ///
    /// - `LockError::Store` if a resulting store mutation fails
    pub fn resolve_biometrics(
        &mut self,
        verdict: BiometricVerdict,
    ) -> Result<Vec<LockEvent>, LockError> {
        let mut events = Vec::new();

        match verdict {
            BiometricVerdict::Approved => {
                let verdict = self.state.accept_biometrics(&self.store)?;
                self.apply(verdict, &mut events);
            },
            BiometricVerdict::Denied => events.push(LockEvent::BiometricsDenied),
            BiometricVerdict::Unavailable => events.push(LockEvent::BiometricsUnavailable),
        }

        self.observer.dispatch(&self.state, &events);
        Ok(events)
    }

    /// True if biometric authentication may run right now: allowed by the
    /// configuration and by the active state.
    #[must_use]
    pub fn biometrics_allowed(&self) -> bool {
        self.config.allow_biometrics && self.state.allows_biometrics()
    }

    /// Register the observer, replacing any previous registration.
    ///
    /// The slot is single and non-owning: the lock never keeps the UI
    /// alive, and notifications stop silently once the observer is dropped.
    pub fn set_observer(&mut self, observer: Weak<dyn LockObserver>) {
        self.observer.set(observer);
    }

    /// Remove the registered observer.
    pub fn clear_observer(&mut self) {
        self.observer.clear();
    }

    /// Active state.
    #[must_use]
    pub fn state(&self) -> &LockState {
        &self.state
    }

    /// Lock policy.
    #[must_use]
    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// Store handle.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of signs currently entered.
    #[must_use]
    pub fn entered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Apply a state verdict: surface its events, replace the state on
    /// transition, and clear the buffer on transition or failure.
    fn apply(&mut self, verdict: Verdict, events: &mut Vec<LockEvent>) {
        let failed = verdict.is_failure();
        events.extend(verdict.events);

        if let Some(next) = verdict.next {
            self.state = next;
            self.buffer.clear();
            events.push(LockEvent::StateChanged);
        } else if failed {
            self.buffer.clear();
        }
    }
}
