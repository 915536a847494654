//! Deterministic test tooling for Keyguard
//!
//! Everything a test needs to drive a lock flow end to end without a
//! platform: a scripted [`Driver`](keyguard_app::Driver) implementation, an
//! observer that records every notification, and a store wrapper injecting
//! seeded failures.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chaos_store;
mod recording;
mod script_driver;

pub use chaos_store::ChaosStore;
pub use recording::{Notification, RecordingObserver};
pub use script_driver::{ScriptError, ScriptedDriver};
