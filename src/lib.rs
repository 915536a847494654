//! Workspace stub crate.
//!
//! Exists only to host development tooling dependencies (git hooks via
//! `cargo-husky`). All functionality lives in the member crates under
//! `crates/`.
