//! Platform-agnostic keypad input.

use keyguard_core::Sign;

/// Keypad input abstraction.
///
/// Decouples the runtime from platform input frameworks, enabling
/// deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A digit key.
    Sign(Sign),
    /// Delete the last entered sign.
    Delete,
    /// Cancel the flow.
    Cancel,
    /// Request biometric authentication.
    Biometrics,
}
