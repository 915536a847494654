//! Driver trait for abstracting platform I/O.
//!
//! The [`Driver`] trait decouples the lock runtime from specific frontends.
//! Each platform implements the trait to provide input delivery, the
//! biometric prompt, and rendering, while the generic [`crate::Runtime`]
//! handles all orchestration.

use std::future::Future;

use keyguard_core::BiometricVerdict;

use crate::{LockScreen, UiEvent};

/// Abstracts platform I/O for the lock runtime.
///
/// # Implementations
///
/// - **Mobile frontend**: touch keypad events, OS biometric prompt, view
///   updates
/// - **Simulation**: scripted events and verdicts for deterministic tests
///
/// The biometric prompt is the only suspension point in the system: the
/// runtime awaits it on its own task, so the verdict is applied to the lock
/// on the same logical thread as every other mutation.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns the next event, or `None` if no event is ready.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform event source failed.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<UiEvent>, Self::Error>> + Send;

    /// True if a biometric sensor is present and enrolled.
    fn biometrics_available(&self) -> bool;

    /// Run the platform biometric prompt and return its outcome.
    ///
    /// Prompt timeouts are the platform's concern; the returned verdict is
    /// final for this request.
    fn prompt_biometrics(&mut self, reason: &str) -> impl Future<Output = BiometricVerdict> + Send;

    /// Render the lock screen.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, screen: &LockScreen) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
