//! Passcode lock core for Keyguard
//!
//! Pure state machine implementing the passcode entry flows of a lock
//! screen: verifying, setting, confirming, changing, and removing a numeric
//! passcode, with biometric authentication as a shortcut.
//!
//! The core is sans-IO: operations consume user input and produce
//! [`LockEvent`]s for the caller to execute, while persistence and the
//! biometric sensor stay behind narrow traits ([`PasscodeStore`] and the
//! driver layer in `keyguard-app`). This enables deterministic testing with
//! the same code that runs in production.
//!
//! # Components
//!
//! - [`PasscodeLock`]: orchestrator dispatching input to the active state
//! - [`LockState`]: the closed set of entry flows and their transitions
//! - [`SignBuffer`]: bounded accumulator for entered signs
//! - [`LockConfig`]: immutable lock policy
//! - [`PasscodeStore`]: repository contract for the persisted record
//! - [`LockObserver`]: push-notification contract for the UI layer

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod biometrics;
mod config;
mod error;
mod event;
mod lock;
mod observer;
mod sign;
mod state;
mod store;

pub use biometrics::BiometricVerdict;
pub use config::{DEFAULT_PASSCODE_LENGTH, LockConfig};
pub use error::LockError;
pub use event::LockEvent;
pub use lock::PasscodeLock;
pub use observer::LockObserver;
pub use sign::{InvalidSign, Passcode, Sign, SignBuffer};
pub use state::{LockMode, LockState, StateKind};
pub use store::{PasscodeStore, StoreError};
