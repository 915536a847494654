//! Lock states and the code-acceptance transition function.
//!
//! Each flow the lock screen supports is one variant of [`LockState`]. The
//! set of reachable states is closed and enumerable; transition logic lives
//! in one exhaustive match, and states are replaced wholesale rather than
//! mutated in place.
//!
//! # State Machine
//!
//! ```text
//! ┌─────────┐  match: unlock          ┌─────────┐  match: delete code
//! │  Enter  │──────────> done         │ Remove  │──────────> done
//! └─────────┘   (mismatch loops)      └─────────┘   (mismatch loops)
//!
//! ┌─────────┐   match    ┌─────────┐  full code   ┌─────────┐
//! │ Change  │───────────>│   Set   │─────────────>│ Confirm │
//! └─────────┘            └─────────┘              └─────────┘
//!  (mismatch loops)           ▲        mismatch:       │
//!                             └────────discard pending─┘
//!                                                 match: store code, done
//! ```
//!
//! # Valid Transitions
//!
//! | From | On full code | To |
//! |------|--------------|----|
//! | Enter | match / mismatch | (terminal) / Enter |
//! | Change | match | Set |
//! | Change | mismatch | Change |
//! | Set | always | Confirm (carrying the code) |
//! | Confirm | match | (terminal, code stored) |
//! | Confirm | mismatch | Set (pending code discarded) |
//! | Remove | match | (terminal, code deleted) |
//! | Remove | mismatch | Remove |

use crate::{
    config::LockConfig,
    error::LockError,
    event::LockEvent,
    sign::Passcode,
    store::PasscodeStore,
};

/// Initial flow selection for a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Verify the stored passcode.
    EnterPasscode,
    /// Establish a new passcode.
    SetPasscode,
    /// Verify the stored passcode, then establish a new one.
    ChangePasscode,
    /// Verify the stored passcode and delete it.
    RemovePasscode,
}

impl LockMode {
    /// Initial state for this mode.
    #[must_use]
    pub fn initial_state(self) -> LockState {
        match self {
            Self::EnterPasscode => LockState::EnterPasscode { allow_cancellation: false },
            Self::SetPasscode => LockState::SetPasscode,
            Self::ChangePasscode => LockState::ChangePasscode,
            Self::RemovePasscode => LockState::RemovePasscode,
        }
    }
}

/// Payload-free view of a lock state, for errors and logging.
///
/// Deliberately omits state payloads so a pending code never leaks through
/// error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    /// Verifying the stored passcode.
    EnterPasscode,
    /// Verifying the stored passcode before choosing a new one.
    ChangePasscode,
    /// Choosing a new passcode.
    SetPasscode,
    /// Confirming the new passcode.
    ConfirmPasscode,
    /// Verifying the stored passcode before removing it.
    RemovePasscode,
}

/// Active lock state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockState {
    /// Verify the stored passcode to unlock.
    EnterPasscode {
        /// Whether the user may abort the flow.
        allow_cancellation: bool,
    },

    /// Verify the stored passcode before choosing a new one.
    ChangePasscode,

    /// Choose a new passcode.
    SetPasscode,

    /// Re-enter the new passcode to confirm it.
    ConfirmPasscode {
        /// Code captured during the preceding set step.
        pending: Passcode,
    },

    /// Verify the stored passcode and remove it.
    RemovePasscode,
}

/// Result of evaluating a complete code: events to surface plus the
/// replacement state, if the flow transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Verdict {
    pub events: Vec<LockEvent>,
    pub next: Option<LockState>,
}

impl Verdict {
    fn stay(events: Vec<LockEvent>) -> Self {
        Self { events, next: None }
    }

    fn transition(events: Vec<LockEvent>, next: LockState) -> Self {
        Self { events, next: Some(next) }
    }

    /// True if the verdict carries a [`LockEvent::Failed`].
    pub fn is_failure(&self) -> bool {
        self.events.iter().any(|event| matches!(event, LockEvent::Failed))
    }
}

/// What a successful verification of the stored code means per flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnVerified {
    Unlock,
    ProceedToSet,
    DeleteStored,
}

impl LockState {
    /// Payload-free discriminant of this state.
    #[must_use]
    pub fn kind(&self) -> StateKind {
        match self {
            Self::EnterPasscode { .. } => StateKind::EnterPasscode,
            Self::ChangePasscode => StateKind::ChangePasscode,
            Self::SetPasscode => StateKind::SetPasscode,
            Self::ConfirmPasscode { .. } => StateKind::ConfirmPasscode,
            Self::RemovePasscode => StateKind::RemovePasscode,
        }
    }

    /// User-facing title for the lock screen.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::EnterPasscode { .. } | Self::RemovePasscode => "Enter Passcode",
            Self::ChangePasscode => "Change Passcode",
            Self::SetPasscode => "Set Passcode",
            Self::ConfirmPasscode { .. } => "Confirm Passcode",
        }
    }

    /// User-facing description for the lock screen.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::EnterPasscode { .. } | Self::RemovePasscode => {
                "Enter your passcode to continue"
            },
            Self::ChangePasscode => "Enter your old passcode",
            Self::SetPasscode => "Enter a new passcode",
            Self::ConfirmPasscode { .. } => "Re-enter your new passcode",
        }
    }

    /// Whether the user may abort this flow without completing it.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        match self {
            Self::EnterPasscode { allow_cancellation } => *allow_cancellation,
            Self::RemovePasscode => true,
            Self::ChangePasscode | Self::SetPasscode | Self::ConfirmPasscode { .. } => false,
        }
    }

    /// Whether biometric authentication may substitute for code entry in
    /// this state.
    ///
    /// Choosing or confirming a new code requires the actual signs, so set
    /// and confirm states never permit biometrics.
    #[must_use]
    pub fn allows_biometrics(&self) -> bool {
        match self {
            Self::EnterPasscode { .. } | Self::ChangePasscode | Self::RemovePasscode => true,
            Self::SetPasscode | Self::ConfirmPasscode { .. } => false,
        }
    }

    /// Evaluate a complete entered code against this state's semantics.
    ///
    /// Invoked by the orchestrator exactly once per completed entry. Store
    /// mutations (attempt counting, code persistence, code removal) happen
    /// here; buffer clearing and `StateChanged` emission are the
    /// orchestrator's job.
    ///
    /// # Errors
    ///
    /// - `LockError::NoStoredPasscode` if a verify flow finds no stored code
    /// - `LockError::Store` if the store fails; never reported as success
    pub(crate) fn accept_code<S: PasscodeStore>(
        &self,
        entered: &Passcode,
        store: &S,
        config: &LockConfig,
    ) -> Result<Verdict, LockError> {
        debug_assert_eq!(entered.len(), config.passcode_length.get());

        match self {
            Self::EnterPasscode { .. } => {
                verify_stored(entered, store, config, OnVerified::Unlock)
            },
            Self::ChangePasscode => {
                verify_stored(entered, store, config, OnVerified::ProceedToSet)
            },
            Self::RemovePasscode => {
                verify_stored(entered, store, config, OnVerified::DeleteStored)
            },
            Self::SetPasscode => Ok(Verdict::transition(
                Vec::new(),
                Self::ConfirmPasscode { pending: entered.clone() },
            )),
            Self::ConfirmPasscode { pending } => {
                if entered == pending {
                    store.set_passcode(entered)?;
                    Ok(Verdict::stay(vec![
                        LockEvent::Succeeded,
                        LockEvent::SucceededWithCode { code: entered.clone() },
                    ]))
                } else {
                    // Pending code is discarded with this state; the user
                    // starts the set step over from scratch.
                    Ok(Verdict::transition(vec![LockEvent::Failed], Self::SetPasscode))
                }
            },
        }
    }

    /// Apply an approved biometric prompt: the success path of a correct
    /// code entry, minus any attempt-counter mutation and without touching
    /// the entry buffer.
    ///
    /// # Errors
    ///
    /// - `LockError::Store` if removing the stored code fails
    pub(crate) fn accept_biometrics<S: PasscodeStore>(
        &self,
        store: &S,
    ) -> Result<Verdict, LockError> {
        match self {
            Self::EnterPasscode { .. } => Ok(Verdict::stay(vec![LockEvent::Succeeded])),
            Self::ChangePasscode => Ok(Verdict::transition(Vec::new(), Self::SetPasscode)),
            Self::RemovePasscode => {
                store.delete_passcode()?;
                Ok(Verdict::stay(vec![LockEvent::Succeeded]))
            },
            // Unreachable through the orchestrator, which gates prompts on
            // `allows_biometrics`.
            Self::SetPasscode | Self::ConfirmPasscode { .. } => {
                Ok(Verdict::stay(vec![LockEvent::BiometricsUnavailable]))
            },
        }
    }
}

/// Compare `entered` with the stored code and apply the flow-specific
/// meaning of a match.
fn verify_stored<S: PasscodeStore>(
    entered: &Passcode,
    store: &S,
    config: &LockConfig,
    on_verified: OnVerified,
) -> Result<Verdict, LockError> {
    let Some(stored) = store.passcode()? else {
        return Err(LockError::NoStoredPasscode);
    };

    if *entered == stored {
        store.reset_failed_attempts()?;

        return Ok(match on_verified {
            OnVerified::Unlock => Verdict::stay(vec![
                LockEvent::Succeeded,
                LockEvent::SucceededWithCode { code: entered.clone() },
            ]),
            OnVerified::ProceedToSet => Verdict::transition(Vec::new(), LockState::SetPasscode),
            OnVerified::DeleteStored => {
                store.delete_passcode()?;
                Verdict::stay(vec![LockEvent::Succeeded])
            },
        });
    }

    let attempts = store.record_failed_attempt()?;
    let mut events = vec![LockEvent::Failed];
    if crossed_retry_allowance(config.allowed_retries, attempts) {
        events.push(LockEvent::AttemptsExceeded { attempts });
    }

    Ok(Verdict::stay(events))
}

/// True exactly when `attempts` reaches the lockout threshold.
///
/// The counter moves in single increments and resets to zero on success, so
/// equality with the threshold identifies the crossing point and fires the
/// signal once per run-up. An allowance of zero locks out on the first
/// failure.
fn crossed_retry_allowance(allowed_retries: Option<u32>, attempts: u32) -> bool {
    match allowed_retries {
        Some(limit) => attempts == limit.max(1),
        None => false,
    }
}
