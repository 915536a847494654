//! Application layer for Keyguard
//!
//! Generic runtime for driving a [`keyguard_core::PasscodeLock`] from
//! platform I/O, enabling deterministic simulation testing with the same
//! orchestration code that runs in production.
//!
//! # Components
//!
//! - [`Driver`]: trait for platform-specific I/O (input, biometric prompt,
//!   rendering)
//! - [`Runtime`]: event loop pumping driver events into the lock on one
//!   logical thread
//! - [`LockScreen`]: render-facing projection of lock state
//! - [`UiEvent`] / [`KeyInput`]: platform-agnostic input model

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod event;
mod input;
mod runtime;
mod screen;

pub use driver::Driver;
pub use event::UiEvent;
pub use input::KeyInput;
pub use runtime::{Completion, Runtime, RuntimeError};
pub use screen::LockScreen;
