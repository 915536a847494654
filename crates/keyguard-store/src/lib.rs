//! Passcode store implementations for Keyguard
//!
//! Two implementations of the [`keyguard_core::PasscodeStore`] contract:
//!
//! - [`MemoryStore`]: shared in-memory record for tests and simulation
//! - [`FileStore`]: CBOR document on disk with atomic replacement
//!
//! Platform keychain integrations implement the same trait outside this
//! repository.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
