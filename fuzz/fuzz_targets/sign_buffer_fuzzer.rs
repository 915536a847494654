//! Fuzz target for the sign entry buffer
//!
//! Ensure bounded growth and index correctness against a reference model
//!
//! # Strategy
//!
//! - Arbitrary append/remove/clear sequences against capacities 1..=16
//! - Plain `Vec` as the reference model; compare length, fullness, and the
//!   joined code after every operation
//!
//! # Invariants
//!
//! - Length never exceeds capacity, never underflows
//! - Append returns the index of the appended sign; remove returns the
//!   index the removed sign occupied
//! - Append on full and remove on empty are errors and leave the buffer
//!   untouched

#![no_main]

use std::num::NonZeroUsize;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use keyguard_core::{LockError, Passcode, Sign, SignBuffer};

#[derive(Debug, Clone, Arbitrary)]
enum BufferOp {
    Append { digit: u8 },
    Remove,
    Clear,
}

fuzz_target!(|input: (u8, Vec<BufferOp>)| {
    let (raw_capacity, ops) = input;
    let capacity = (raw_capacity % 16) as usize + 1;
    let Some(nz_capacity) = NonZeroUsize::new(capacity) else {
        return;
    };

    let mut buffer = SignBuffer::new(nz_capacity);
    let mut model: Vec<Sign> = Vec::new();

    for op in ops {
        match op {
            BufferOp::Append { digit } => {
                let Some(sign) = Sign::new(digit % 10) else {
                    continue;
                };

                match buffer.append(sign) {
                    Ok(index) => {
                        assert_eq!(index, model.len());
                        model.push(sign);
                    }
                    Err(LockError::BufferFull { capacity: reported }) => {
                        assert_eq!(reported, capacity);
                        assert_eq!(model.len(), capacity);
                    }
                    Err(other) => panic!("unexpected append error: {other:?}"),
                }
            }
            BufferOp::Remove => match buffer.remove() {
                Ok(index) => {
                    assert!(model.pop().is_some());
                    assert_eq!(index, model.len());
                }
                Err(LockError::BufferEmpty) => assert!(model.is_empty()),
                Err(other) => panic!("unexpected remove error: {other:?}"),
            },
            BufferOp::Clear => {
                buffer.clear();
                model.clear();
            }
        }

        assert!(buffer.len() <= capacity);
        assert_eq!(buffer.len(), model.len());
        assert_eq!(buffer.is_full(), model.len() == capacity);
        assert_eq!(buffer.is_empty(), model.is_empty());
        assert_eq!(buffer.as_code(), Passcode::new(model.clone()));
    }
});
