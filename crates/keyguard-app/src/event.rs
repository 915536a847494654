//! Runtime input events.
//!
//! Events originate from two sources: user interaction with the keypad and
//! host-application lifecycle changes. Lifecycle events replace the OS
//! notification-center wiring a platform frontend would register; the
//! runtime only needs the suspend/resume signal itself.

use crate::KeyInput;

/// Events processed by the lock runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Keypad input.
    Key(KeyInput),

    /// Host moved the application to the background.
    ///
    /// Pauses automatic biometric prompting until [`UiEvent::Resumed`].
    Suspended,

    /// Host brought the application back to the foreground.
    Resumed,

    /// Periodic tick; no state effect.
    Tick,
}
