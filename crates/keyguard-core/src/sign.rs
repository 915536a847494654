//! Passcode signs, complete codes, and the bounded entry buffer.
//!
//! A [`Sign`] is one discrete input symbol (a decimal digit). A [`Passcode`]
//! is the full ordered sequence of signs. The [`SignBuffer`] accumulates
//! signs as the user types, bounded by the configured passcode length.

use std::{fmt, num::NonZeroUsize};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LockError;

/// Error for sign values outside the decimal alphabet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid sign value {0}: expected a decimal digit")]
pub struct InvalidSign(pub u8);

/// A single passcode input symbol (decimal digit `0..=9`).
///
/// Deserialization validates the range, so a corrupted store document cannot
/// smuggle an out-of-alphabet sign into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sign(u8);

impl Sign {
    /// Create a sign from a digit value. `None` if `digit` is not in `0..=9`.
    #[must_use]
    pub fn new(digit: u8) -> Option<Self> {
        (digit <= 9).then_some(Self(digit))
    }

    /// Create a sign from a character. `None` if `c` is not `'0'..='9'`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    /// Digit value in `0..=9`.
    #[must_use]
    pub fn digit(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Sign {
    type Error = InvalidSign;

    fn try_from(digit: u8) -> Result<Self, Self::Error> {
        Self::new(digit).ok_or(InvalidSign(digit))
    }
}

impl From<Sign> for u8 {
    fn from(sign: Sign) -> Self {
        sign.0
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complete ordered passcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passcode(Vec<Sign>);

impl Passcode {
    /// Create a passcode from a sequence of signs.
    #[must_use]
    pub fn new(signs: Vec<Sign>) -> Self {
        Self(signs)
    }

    /// Parse a passcode from a digit string. `None` if any character is not
    /// a decimal digit.
    #[must_use]
    pub fn parse(digits: &str) -> Option<Self> {
        digits.chars().map(Sign::from_char).collect::<Option<Vec<_>>>().map(Self)
    }

    /// Signs in entry order.
    #[must_use]
    pub fn signs(&self) -> &[Sign] {
        &self.0
    }

    /// Number of signs in the code.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the code holds no signs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sign in &self.0 {
            write!(f, "{sign}")?;
        }
        Ok(())
    }
}

/// Bounded buffer accumulating the signs of one entry attempt.
///
/// Owned and mutated exclusively by the [`crate::PasscodeLock`]; cleared on
/// every state transition and on every mismatch. The length can never exceed
/// the capacity: appending to a full buffer is an error, not a silent drop,
/// so a misbehaving UI fails loudly in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignBuffer {
    signs: Vec<Sign>,
    capacity: usize,
}

impl SignBuffer {
    /// Create an empty buffer with the given capacity.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { signs: Vec::with_capacity(capacity.get()), capacity: capacity.get() }
    }

    /// Append a sign and return its zero-based index.
    ///
    /// # Errors
    ///
    /// - `LockError::BufferFull` if the buffer already holds a complete code
    pub fn append(&mut self, sign: Sign) -> Result<usize, LockError> {
        if self.signs.len() == self.capacity {
            return Err(LockError::BufferFull { capacity: self.capacity });
        }

        self.signs.push(sign);
        Ok(self.signs.len() - 1)
    }

    /// Remove the last sign and return the index it occupied.
    ///
    /// # Errors
    ///
    /// - `LockError::BufferEmpty` if no sign has been entered
    pub fn remove(&mut self) -> Result<usize, LockError> {
        if self.signs.pop().is_none() {
            return Err(LockError::BufferEmpty);
        }

        Ok(self.signs.len())
    }

    /// Reset the buffer to empty.
    pub fn clear(&mut self) {
        self.signs.clear();
    }

    /// True if the buffer holds a complete code.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.signs.len() == self.capacity
    }

    /// True if no sign has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    /// Number of entered signs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signs.len()
    }

    /// Maximum number of signs (the configured passcode length).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Joined representation of the entered signs.
    #[must_use]
    pub fn as_code(&self) -> Passcode {
        Passcode::new(self.signs.clone())
    }
}
