//! Lock policy configuration.

use std::num::NonZeroUsize;

/// Default number of signs in a complete passcode.
pub const DEFAULT_PASSCODE_LENGTH: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(len) => len,
    None => unreachable!(),
};

/// Immutable lock policy.
///
/// Created once at lock construction and never mutated. The repository
/// handle is supplied separately to [`crate::PasscodeLock::new`] so the
/// configuration stays a plain value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockConfig {
    /// Required number of signs in a complete passcode.
    pub passcode_length: NonZeroUsize,
    /// Failed attempts tolerated before the lockout signal fires.
    /// `None` means unlimited retries. An allowance of `0` locks out on the
    /// first failure.
    pub allowed_retries: Option<u32>,
    /// Whether biometric authentication may be offered at all.
    pub allow_biometrics: bool,
    /// Whether the biometric prompt should run as soon as the lock screen is
    /// presented or brought back to the foreground.
    pub request_biometrics_immediately: bool,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            passcode_length: DEFAULT_PASSCODE_LENGTH,
            allowed_retries: None,
            allow_biometrics: true,
            request_biometrics_immediately: false,
        }
    }
}
