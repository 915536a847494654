//! Scripted driver for deterministic runtime tests.

use std::collections::VecDeque;

use keyguard_app::{Driver, LockScreen, UiEvent};
use keyguard_core::BiometricVerdict;
use thiserror::Error;

/// Errors produced by the scripted driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The script ran out of events while the flow was still running.
    ///
    /// A test script must complete its flow (success or cancellation)
    /// before the last event is consumed; exhaustion means the scenario
    /// under test did not behave as scripted.
    #[error("script exhausted with the flow still running")]
    Exhausted,
}

/// Driver that replays a pre-written event script.
///
/// Events are handed to the runtime in script order; biometric prompts
/// consume scripted verdicts. Every rendered [`LockScreen`] and every
/// prompt reason is recorded for assertions.
#[derive(Debug, Clone)]
pub struct ScriptedDriver {
    events: VecDeque<UiEvent>,
    verdicts: VecDeque<BiometricVerdict>,
    biometrics_available: bool,
    rendered: Vec<LockScreen>,
    prompts: Vec<String>,
    stopped: bool,
}

impl ScriptedDriver {
    /// Create a driver replaying `events`, with no biometric sensor.
    pub fn new(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            verdicts: VecDeque::new(),
            biometrics_available: false,
            rendered: Vec::new(),
            prompts: Vec::new(),
            stopped: false,
        }
    }

    /// Enable the simulated sensor and script its verdicts, in prompt order.
    #[must_use]
    pub fn with_biometrics(mut self, verdicts: impl IntoIterator<Item = BiometricVerdict>) -> Self {
        self.biometrics_available = true;
        self.verdicts = verdicts.into_iter().collect();
        self
    }

    /// Every screen rendered so far, in order.
    #[must_use]
    pub fn rendered(&self) -> &[LockScreen] {
        &self.rendered
    }

    /// The most recently rendered screen.
    #[must_use]
    pub fn last_screen(&self) -> Option<&LockScreen> {
        self.rendered.last()
    }

    /// Reasons passed to the biometric prompt, in order.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// True once the runtime released the driver.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Driver for ScriptedDriver {
    type Error = ScriptError;

    async fn poll_event(&mut self) -> Result<Option<UiEvent>, Self::Error> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => Err(ScriptError::Exhausted),
        }
    }

    fn biometrics_available(&self) -> bool {
        self.biometrics_available
    }

    async fn prompt_biometrics(&mut self, reason: &str) -> BiometricVerdict {
        self.prompts.push(reason.to_string());

        match self.verdicts.pop_front() {
            Some(verdict) => verdict,
            None => {
                tracing::warn!("biometric prompt without a scripted verdict");
                BiometricVerdict::Unavailable
            },
        }
    }

    fn render(&mut self, screen: &LockScreen) -> Result<(), Self::Error> {
        self.rendered.push(screen.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
