//! Biometric capability model.
//!
//! The sensor itself is an external collaborator: the core only decides
//! *whether* a prompt may run ([`crate::PasscodeLock::request_biometrics`])
//! and *what* a finished prompt means
//! ([`crate::PasscodeLock::resolve_biometrics`]).

/// Outcome of a platform biometric prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometricVerdict {
    /// The user was positively authenticated.
    Approved,

    /// The user dismissed or failed the prompt.
    Denied,

    /// No biometric capability is present or enrolled.
    Unavailable,
}
