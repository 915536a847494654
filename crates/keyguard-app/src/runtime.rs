//! Generic runtime for lock orchestration.
//!
//! The Runtime drives the lock event loop, coordinating between:
//! - [`keyguard_core::PasscodeLock`]: the passcode state machine
//! - [`Driver`]: platform-specific I/O
//!
//! All lock mutations happen on the runtime's own task. The biometric
//! prompt is awaited in place, so its verdict is applied on the same
//! logical thread as keypad input, preserving the lock's single-threaded
//! driving model.

use keyguard_core::{
    BiometricVerdict, LockError, LockEvent, Passcode, PasscodeLock, PasscodeStore,
};
use thiserror::Error;

use crate::{Driver, KeyInput, LockScreen, UiEvent};

/// Terminal outcome of a lock flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The flow finished successfully.
    Unlocked {
        /// Code the flow verified or established, when one was entered.
        /// Biometric and remove successes carry no code.
        code: Option<Passcode>,
    },

    /// A cancellable flow was aborted by the user.
    Cancelled,
}

/// Errors terminating a runtime loop.
#[derive(Error, Debug)]
pub enum RuntimeError<E>
where
    E: std::error::Error + Send + 'static,
{
    /// The platform driver failed.
    #[error("driver error: {0}")]
    Driver(#[source] E),

    /// The lock hit an unrecoverable store failure.
    ///
    /// Invariant-class lock errors are logged and absorbed instead; see
    /// [`LockError::is_invariant_violation`].
    #[error("lock error: {0}")]
    Lock(#[from] LockError),
}

/// Generic runtime that orchestrates a lock and a driver.
///
/// # Type Parameters
///
/// - `D`: platform-specific I/O driver
/// - `S`: passcode store implementation
pub struct Runtime<D, S>
where
    D: Driver,
    S: PasscodeStore,
{
    driver: D,
    lock: PasscodeLock<S>,
    biometrics_paused: bool,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: PasscodeStore,
{
    /// Create a runtime around an existing lock.
    pub fn new(driver: D, lock: PasscodeLock<S>) -> Self {
        Self { driver, lock, biometrics_paused: false }
    }

    /// Run the event loop until the flow completes.
    ///
    /// Renders the initial screen, optionally fires the immediate biometric
    /// prompt, then pumps driver events until a success or cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Driver`] if the driver fails and
    /// [`RuntimeError::Lock`] on unrecoverable store failures.
    pub async fn run(&mut self) -> Result<Completion, RuntimeError<D::Error>> {
        self.render()?;

        if self.lock.config().request_biometrics_immediately
            && let Some(completion) = self.try_biometrics().await?
        {
            self.driver.stop();
            return Ok(completion);
        }

        loop {
            if let Some(completion) = self.process_cycle().await? {
                self.driver.stop();
                return Ok(completion);
            }
        }
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns the terminal outcome once the flow completes.
    async fn process_cycle(&mut self) -> Result<Option<Completion>, RuntimeError<D::Error>> {
        let Some(event) = self.driver.poll_event().await.map_err(RuntimeError::Driver)? else {
            return Ok(None);
        };

        match event {
            UiEvent::Tick => Ok(None),
            UiEvent::Suspended => {
                self.biometrics_paused = true;
                Ok(None)
            },
            UiEvent::Resumed => {
                self.biometrics_paused = false;
                if self.lock.config().request_biometrics_immediately {
                    return self.try_biometrics().await;
                }
                Ok(None)
            },
            UiEvent::Key(key) => self.handle_key(key).await,
        }
    }

    async fn handle_key(
        &mut self,
        key: KeyInput,
    ) -> Result<Option<Completion>, RuntimeError<D::Error>> {
        let events = match key {
            KeyInput::Sign(sign) => self.lock_op(|lock| lock.add_sign(sign))?,
            KeyInput::Delete => self.lock_op(PasscodeLock::remove_sign)?,
            KeyInput::Cancel => self.lock_op(PasscodeLock::cancel)?,
            KeyInput::Biometrics => return self.try_biometrics().await,
        };

        self.render()?;
        Ok(completion_from(&events))
    }

    /// Fire the biometric prompt if permitted.
    ///
    /// Skipped entirely while suspended. When no sensor is available the
    /// lock is told so, keeping denial and unavailability distinguishable
    /// for the observer.
    async fn try_biometrics(&mut self) -> Result<Option<Completion>, RuntimeError<D::Error>> {
        if self.biometrics_paused {
            return Ok(None);
        }

        if !self.driver.biometrics_available() {
            let events = self.lock.resolve_biometrics(BiometricVerdict::Unavailable)?;
            self.render()?;
            return Ok(completion_from(&events));
        }

        let requested = self.lock.request_biometrics();
        let mut completion = None;

        for event in &requested {
            if let LockEvent::BiometricPromptRequested { reason } = event {
                let verdict = self.driver.prompt_biometrics(reason).await;
                let resolved = self.lock.resolve_biometrics(verdict)?;
                completion = completion_from(&resolved);
            }
        }

        self.render()?;
        Ok(completion)
    }

    /// Run a lock operation, absorbing invariant violations with a warning.
    ///
    /// A well-behaved frontend never triggers them (it disables input at
    /// the length limits), so they are logged loudly but do not abort the
    /// flow. Store failures do.
    fn lock_op(
        &mut self,
        op: impl FnOnce(&mut PasscodeLock<S>) -> Result<Vec<LockEvent>, LockError>,
    ) -> Result<Vec<LockEvent>, RuntimeError<D::Error>> {
        match op(&mut self.lock) {
            Ok(events) => Ok(events),
            Err(err) if err.is_invariant_violation() => {
                tracing::warn!("lock rejected input: {err}");
                Ok(Vec::new())
            },
            Err(err) => Err(RuntimeError::Lock(err)),
        }
    }

    fn render(&mut self) -> Result<(), RuntimeError<D::Error>> {
        let screen = LockScreen::project(&self.lock);
        self.driver.render(&screen).map_err(RuntimeError::Driver)
    }

    /// The lock being driven.
    pub fn lock(&self) -> &PasscodeLock<S> {
        &self.lock
    }

    /// Mutable access to the lock (observer registration).
    pub fn lock_mut(&mut self) -> &mut PasscodeLock<S> {
        &mut self.lock
    }

    /// The platform driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the platform driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

/// Extract a terminal outcome from emitted events, if any.
fn completion_from(events: &[LockEvent]) -> Option<Completion> {
    let mut unlocked = false;
    let mut code = None;

    for event in events {
        match event {
            LockEvent::Succeeded => unlocked = true,
            LockEvent::SucceededWithCode { code: confirmed } => {
                unlocked = true;
                code = Some(confirmed.clone());
            },
            LockEvent::Cancelled => return Some(Completion::Cancelled),
            _ => {},
        }
    }

    unlocked.then_some(Completion::Unlocked { code })
}
