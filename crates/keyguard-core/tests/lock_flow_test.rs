//! Integration tests for the passcode lock flows.
//!
//! # Oracle Pattern
//!
//! Tests drive complete flows through the public API and end with oracle
//! checks against both sides of the contract: the store contents and the
//! notifications captured by a recording observer.

use std::sync::{Arc, Weak};

use keyguard_core::{
    BiometricVerdict, LockConfig, LockError, LockEvent, LockMode, LockObserver, Passcode,
    PasscodeLock, PasscodeStore, Sign, StateKind, StoreError,
};
use keyguard_harness::{ChaosStore, Notification, RecordingObserver};
use keyguard_store::MemoryStore;

fn code(digits: &str) -> Passcode {
    Passcode::parse(digits).expect("test digits must parse")
}

fn observed_lock<S: PasscodeStore>(
    mode: LockMode,
    config: LockConfig,
    store: S,
) -> (PasscodeLock<S>, Arc<RecordingObserver>) {
    let mut lock = PasscodeLock::new(mode, config, store);
    let observer = RecordingObserver::new();
    let observer_dyn: Arc<dyn LockObserver> = observer.clone();
    let weak: Weak<dyn LockObserver> = Arc::downgrade(&observer_dyn);
    lock.set_observer(weak);
    (lock, observer)
}

/// Type in a full code, collecting all emitted events.
fn enter_code<S: PasscodeStore>(lock: &mut PasscodeLock<S>, digits: &str) -> Vec<LockEvent> {
    let mut events = Vec::new();
    for c in digits.chars() {
        let sign = Sign::from_char(c).expect("test digit");
        events.extend(lock.add_sign(sign).expect("add_sign must succeed"));
    }
    events
}

#[test]
fn enter_correct_code_succeeds_and_resets_attempts() {
    let store = MemoryStore::with_passcode(code("1234"));
    let _ = store.record_failed_attempt().expect("seed attempt count");

    let (mut lock, observer) =
        observed_lock(LockMode::EnterPasscode, LockConfig::default(), store.clone());

    let events = enter_code(&mut lock, "1234");

    assert!(events.contains(&LockEvent::Succeeded));
    assert!(events.contains(&LockEvent::SucceededWithCode { code: code("1234") }));
    assert_eq!(store.failed_attempts().expect("read"), 0);

    assert_eq!(observer.count(|n| matches!(n, Notification::Succeeded)), 1);
    assert_eq!(observer.count(|n| matches!(n, Notification::SignAdded(_))), 4);
}

#[test]
fn enter_wrong_code_fails_increments_and_clears_buffer() {
    let store = MemoryStore::with_passcode(code("1234"));
    let (mut lock, observer) =
        observed_lock(LockMode::EnterPasscode, LockConfig::default(), store.clone());

    let events = enter_code(&mut lock, "1235");

    assert!(events.contains(&LockEvent::Failed));
    assert!(!events.contains(&LockEvent::Succeeded));
    assert_eq!(store.failed_attempts().expect("read"), 1);
    assert_eq!(lock.entered_len(), 0);
    assert_eq!(lock.state().kind(), StateKind::EnterPasscode);

    assert_eq!(observer.count(|n| matches!(n, Notification::Failed)), 1);

    // The flow keeps accepting attempts: the correct code still unlocks.
    let events = enter_code(&mut lock, "1234");
    assert!(events.contains(&LockEvent::Succeeded));
    assert_eq!(store.failed_attempts().expect("read"), 0);
}

#[test]
fn lockout_fires_exactly_once_at_the_crossing() {
    let store = MemoryStore::with_passcode(code("1234"));
    let config = LockConfig { allowed_retries: Some(2), ..LockConfig::default() };
    let (mut lock, observer) = observed_lock(LockMode::EnterPasscode, config, store.clone());

    let first = enter_code(&mut lock, "0000");
    assert!(!first.iter().any(|e| matches!(e, LockEvent::AttemptsExceeded { .. })));

    let second = enter_code(&mut lock, "0000");
    assert!(second.contains(&LockEvent::AttemptsExceeded { attempts: 2 }));

    let third = enter_code(&mut lock, "0000");
    assert!(!third.iter().any(|e| matches!(e, LockEvent::AttemptsExceeded { .. })));

    assert_eq!(observer.count(|n| matches!(n, Notification::AttemptsExceeded(_))), 1);
    assert_eq!(store.failed_attempts().expect("read"), 3);
}

#[test]
fn lockout_rearms_after_a_successful_entry() {
    let store = MemoryStore::with_passcode(code("1234"));
    let config = LockConfig { allowed_retries: Some(1), ..LockConfig::default() };
    let (mut lock, observer) = observed_lock(LockMode::EnterPasscode, config, store);

    let _ = enter_code(&mut lock, "0000");
    let _ = enter_code(&mut lock, "1234");
    let events = enter_code(&mut lock, "0000");

    assert!(events.contains(&LockEvent::AttemptsExceeded { attempts: 1 }));
    assert_eq!(observer.count(|n| matches!(n, Notification::AttemptsExceeded(_))), 2);
}

#[test]
fn set_confirm_roundtrip_stores_the_code() {
    let store = MemoryStore::new();
    let (mut lock, observer) =
        observed_lock(LockMode::SetPasscode, LockConfig::default(), store.clone());

    let set_events = enter_code(&mut lock, "4321");
    assert!(set_events.contains(&LockEvent::StateChanged));
    assert_eq!(lock.state().kind(), StateKind::ConfirmPasscode);

    let confirm_events = enter_code(&mut lock, "4321");
    assert!(confirm_events.contains(&LockEvent::Succeeded));
    assert!(confirm_events.contains(&LockEvent::SucceededWithCode { code: code("4321") }));
    assert_eq!(store.passcode().expect("read"), Some(code("4321")));

    assert_eq!(
        observer.count(|n| *n == Notification::StateChanged(StateKind::ConfirmPasscode)),
        1
    );
}

#[test]
fn confirm_mismatch_discards_pending_and_returns_to_set() {
    let store = MemoryStore::new();
    let (mut lock, _observer) =
        observed_lock(LockMode::SetPasscode, LockConfig::default(), store.clone());

    let _ = enter_code(&mut lock, "4321");
    let events = enter_code(&mut lock, "9999");

    assert!(events.contains(&LockEvent::Failed));
    assert!(events.contains(&LockEvent::StateChanged));
    assert_eq!(lock.state().kind(), StateKind::SetPasscode);
    assert_eq!(lock.entered_len(), 0);

    // No repository write happened.
    assert_eq!(store.passcode().expect("read"), None);

    // The user starts over; the discarded pending code is gone for good.
    let _ = enter_code(&mut lock, "7777");
    let events = enter_code(&mut lock, "7777");
    assert!(events.contains(&LockEvent::Succeeded));
    assert_eq!(store.passcode().expect("read"), Some(code("7777")));
}

#[test]
fn set_flow_ignores_the_attempt_counter() {
    let store = MemoryStore::new();
    let (mut lock, _observer) =
        observed_lock(LockMode::SetPasscode, LockConfig::default(), store.clone());

    let _ = enter_code(&mut lock, "4321");
    let _ = enter_code(&mut lock, "9999");

    assert_eq!(store.failed_attempts().expect("read"), 0);
}

#[test]
fn change_flow_verifies_old_code_then_sets_new() {
    let store = MemoryStore::with_passcode(code("1111"));
    let (mut lock, observer) =
        observed_lock(LockMode::ChangePasscode, LockConfig::default(), store.clone());

    // Wrong old code loops in the verify step and counts an attempt.
    let events = enter_code(&mut lock, "2222");
    assert!(events.contains(&LockEvent::Failed));
    assert_eq!(lock.state().kind(), StateKind::ChangePasscode);
    assert_eq!(store.failed_attempts().expect("read"), 1);

    // Correct old code advances to the set step and resets the counter.
    let events = enter_code(&mut lock, "1111");
    assert!(events.contains(&LockEvent::StateChanged));
    assert_eq!(lock.state().kind(), StateKind::SetPasscode);
    assert_eq!(store.failed_attempts().expect("read"), 0);

    let _ = enter_code(&mut lock, "3333");
    let events = enter_code(&mut lock, "3333");
    assert!(events.contains(&LockEvent::Succeeded));
    assert_eq!(store.passcode().expect("read"), Some(code("3333")));

    // Change → Set, then Set → Confirm.
    assert_eq!(observer.count(|n| matches!(n, Notification::StateChanged(_))), 2);
}

#[test]
fn remove_flow_deletes_the_stored_code() {
    let store = MemoryStore::with_passcode(code("1234"));
    let (mut lock, observer) =
        observed_lock(LockMode::RemovePasscode, LockConfig::default(), store.clone());

    let events = enter_code(&mut lock, "1234");

    assert!(events.contains(&LockEvent::Succeeded));
    assert!(!events.iter().any(|e| matches!(e, LockEvent::SucceededWithCode { .. })));
    assert_eq!(store.passcode().expect("read"), None);
    assert_eq!(observer.count(|n| matches!(n, Notification::Succeeded)), 1);
}

#[test]
fn remove_flow_mismatch_keeps_the_stored_code() {
    let store = MemoryStore::with_passcode(code("1234"));
    let (mut lock, _observer) =
        observed_lock(LockMode::RemovePasscode, LockConfig::default(), store.clone());

    let events = enter_code(&mut lock, "0000");

    assert!(events.contains(&LockEvent::Failed));
    assert_eq!(store.passcode().expect("read"), Some(code("1234")));
    assert_eq!(store.failed_attempts().expect("read"), 1);
}

#[test]
fn cancel_terminates_without_store_mutation() {
    let store = MemoryStore::with_passcode(code("1234"));
    let (mut lock, observer) =
        observed_lock(LockMode::RemovePasscode, LockConfig::default(), store.clone());

    let _ = enter_code(&mut lock, "12");
    let events = lock.cancel().expect("remove flow is cancellable");

    assert_eq!(events, vec![LockEvent::Cancelled]);
    assert_eq!(store.passcode().expect("read"), Some(code("1234")));
    assert_eq!(store.failed_attempts().expect("read"), 0);
    assert_eq!(observer.count(|n| matches!(n, Notification::Cancelled)), 1);
}

#[test]
fn dismissable_verify_screen_allows_cancel() {
    use keyguard_core::LockState;

    let store = MemoryStore::with_passcode(code("1234"));
    let mut lock = PasscodeLock::with_initial_state(
        LockState::EnterPasscode { allow_cancellation: true },
        LockConfig::default(),
        store.clone(),
    );

    let events = lock.cancel().expect("cancellable verify screen");

    assert_eq!(events, vec![LockEvent::Cancelled]);
    assert_eq!(store.passcode().expect("read"), Some(code("1234")));
}

#[test]
fn biometric_approval_bypasses_buffer_and_counter() {
    let store = MemoryStore::with_passcode(code("1234"));
    let _ = store.record_failed_attempt().expect("seed attempt count");

    let (mut lock, observer) =
        observed_lock(LockMode::EnterPasscode, LockConfig::default(), store.clone());

    // Partial manual entry, then the sensor takes over.
    let _ = lock.add_sign(Sign::new(9).expect("digit")).expect("add_sign");

    let requested = lock.request_biometrics();
    assert!(matches!(requested.as_slice(), [LockEvent::BiometricPromptRequested { .. }]));

    let events =
        lock.resolve_biometrics(BiometricVerdict::Approved).expect("resolve succeeds");

    assert!(events.contains(&LockEvent::Succeeded));
    // Attempt counter untouched, unlike a correct manual entry.
    assert_eq!(store.failed_attempts().expect("read"), 1);
    assert_eq!(observer.count(|n| matches!(n, Notification::Succeeded)), 1);
}

#[test]
fn biometric_denial_is_not_a_failure() {
    let store = MemoryStore::with_passcode(code("1234"));
    let (mut lock, observer) =
        observed_lock(LockMode::EnterPasscode, LockConfig::default(), store.clone());

    let events =
        lock.resolve_biometrics(BiometricVerdict::Denied).expect("resolve succeeds");

    assert_eq!(events, vec![LockEvent::BiometricsDenied]);
    assert_eq!(store.failed_attempts().expect("read"), 0);
    assert_eq!(observer.count(|n| matches!(n, Notification::Failed)), 0);
    assert_eq!(observer.count(|n| matches!(n, Notification::BiometricsDenied)), 1);
}

#[test]
fn biometric_approval_advances_the_change_flow() {
    let store = MemoryStore::with_passcode(code("1234"));
    let (mut lock, _observer) =
        observed_lock(LockMode::ChangePasscode, LockConfig::default(), store.clone());

    let _ = lock.request_biometrics();
    let events =
        lock.resolve_biometrics(BiometricVerdict::Approved).expect("resolve succeeds");

    assert!(events.contains(&LockEvent::StateChanged));
    assert_eq!(lock.state().kind(), StateKind::SetPasscode);
    // The old code is still stored until the new one is confirmed.
    assert_eq!(store.passcode().expect("read"), Some(code("1234")));
}

#[test]
fn biometric_approval_completes_the_remove_flow() {
    let store = MemoryStore::with_passcode(code("1234"));
    let (mut lock, _observer) =
        observed_lock(LockMode::RemovePasscode, LockConfig::default(), store.clone());

    let events =
        lock.resolve_biometrics(BiometricVerdict::Approved).expect("resolve succeeds");

    assert!(events.contains(&LockEvent::Succeeded));
    assert_eq!(store.passcode().expect("read"), None);
}

#[test]
fn verify_without_stored_code_is_an_invariant_violation() {
    let (mut lock, _observer) =
        observed_lock(LockMode::EnterPasscode, LockConfig::default(), MemoryStore::new());

    let _ = enter_code(&mut lock, "123");
    let result = lock.add_sign(Sign::from_char('4').expect("digit"));

    assert_eq!(result, Err(LockError::NoStoredPasscode));
}

#[test]
fn failed_store_write_is_never_reported_as_success() {
    // Rate 1.0: every store operation fails.
    let store = ChaosStore::with_seed(MemoryStore::new(), 1.0, 7);
    let (mut lock, observer) =
        observed_lock(LockMode::SetPasscode, LockConfig::default(), store.clone());

    // The set step touches no store and works normally.
    let _ = enter_code(&mut lock, "4321");
    assert_eq!(lock.state().kind(), StateKind::ConfirmPasscode);

    // The confirm step must persist the code; the write fails loudly.
    let _ = enter_code(&mut lock, "432");
    let result = lock.add_sign(Sign::from_char('1').expect("digit"));

    assert!(matches!(result, Err(LockError::Store(StoreError::Io(_)))));
    assert_eq!(observer.count(|n| matches!(n, Notification::Succeeded)), 0);
    assert_eq!(store.inner().passcode().expect("oracle read"), None);
}

#[test]
fn chaos_store_replays_deterministically() {
    let failures = |seed: u64| -> Vec<bool> {
        let store = ChaosStore::with_seed(MemoryStore::new(), 0.5, seed);
        (0..32).map(|_| store.failed_attempts().is_err()).collect()
    };

    assert_eq!(failures(42), failures(42));
    assert_ne!(failures(42), failures(43));
}
