//! Process-wide defaults that per-use-site policies are cloned from.
//!
//! The defaults sit behind a `RwLock`; use sites take a clone with
//! [`equivalency_defaults`] (or `EquivalencyPolicy::from_defaults`) and never
//! hold the lock while comparing.
use std::sync::{OnceLock, PoisonError, RwLock};

use super::config::EquivalencyPolicy;

fn cell() -> &'static RwLock<EquivalencyPolicy> {
    static DEFAULTS: OnceLock<RwLock<EquivalencyPolicy>> = OnceLock::new();
    DEFAULTS.get_or_init(|| RwLock::new(EquivalencyPolicy::default()))
}

/// Clone of the current defaults. Mutating the clone never reaches the defaults.
#[must_use]
pub fn equivalency_defaults() -> EquivalencyPolicy {
    cell().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Change the defaults every later `from_defaults()` starts from.
pub fn assert_equivalency_using(configure: impl FnOnce(&mut EquivalencyPolicy)) {
    let mut guard = cell().write().unwrap_or_else(PoisonError::into_inner);
    configure(&mut *guard);
    log::debug!(target: "equivalency", "defaults updated: policy_id={}", guard.policy_id());
}

/// Restore the hard-coded defaults.
pub fn reset_equivalency_defaults() {
    let mut guard = cell().write().unwrap_or_else(PoisonError::into_inner);
    *guard = EquivalencyPolicy::default();
}
