//! Store wrapper injecting seeded probabilistic failures.

use std::sync::{Arc, Mutex};

use keyguard_core::{Passcode, PasscodeStore, StoreError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Wraps a store and fails each operation with a seeded probability.
///
/// Deterministic: the same seed and operation order produce the same
/// failures, so chaos scenarios replay exactly. A failure rate of `1.0`
/// turns the wrapper into an always-failing store for hard-failure tests.
///
/// Clones share the RNG, so interleaved use across clones stays on one
/// deterministic failure sequence.
#[derive(Debug, Clone)]
pub struct ChaosStore<S> {
    inner: S,
    failure_rate: f64,
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl<S> ChaosStore<S> {
    /// Wrap `inner`, failing each operation with probability
    /// `failure_rate`, using a deterministic RNG seeded with `seed`.
    pub fn with_seed(inner: S, failure_rate: f64, seed: u64) -> Self {
        Self {
            inner,
            failure_rate,
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }

    /// The wrapped store, bypassing chaos injection (for oracle checks).
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn roll(&self) -> Result<(), StoreError> {
        let failed = self
            .rng
            .lock()
            .map(|mut rng| rng.gen_bool(self.failure_rate))
            .unwrap_or(true);

        if failed {
            return Err(StoreError::Io("injected chaos failure".to_string()));
        }

        Ok(())
    }
}

impl<S: PasscodeStore> PasscodeStore for ChaosStore<S> {
    fn passcode(&self) -> Result<Option<Passcode>, StoreError> {
        self.roll()?;
        self.inner.passcode()
    }

    fn set_passcode(&self, code: &Passcode) -> Result<(), StoreError> {
        self.roll()?;
        self.inner.set_passcode(code)
    }

    fn delete_passcode(&self) -> Result<(), StoreError> {
        self.roll()?;
        self.inner.delete_passcode()
    }

    fn failed_attempts(&self) -> Result<u32, StoreError> {
        self.roll()?;
        self.inner.failed_attempts()
    }

    fn record_failed_attempt(&self) -> Result<u32, StoreError> {
        self.roll()?;
        self.inner.record_failed_attempt()
    }

    fn reset_failed_attempts(&self) -> Result<(), StoreError> {
        self.roll()?;
        self.inner.reset_failed_attempts()
    }
}
