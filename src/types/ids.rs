//! Deterministic UUIDv5 identifiers for effective policies.
//!
//! The UUID namespace is derived from a stable tag (`NS_TAG`) so that two
//! policies configured with the same switches and the same rule sequences
//! share a `policy_id` across runs.
use std::fmt::Write;
use uuid::Uuid;

use crate::constants::NS_TAG;
use crate::policy::EffectivePolicy;

fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

/// Serialize everything that changes comparator behaviour into a stable string.
///
/// `describe()` already covers typing mode, selection, matching and steps in
/// evaluation order; ordering rules and the remaining switches are appended.
fn serialize_policy(policy: &EffectivePolicy) -> String {
    let mut s = policy.describe();
    for rule in policy.ordering_rules() {
        let _ = writeln!(s, "O:{}", rule.description());
    }
    let _ = writeln!(
        s,
        "S:recursive={};infinite={};cyclic={:?};enums={:?};all_public={}",
        policy.is_recursive(),
        policy.allows_infinite_recursion(),
        policy.cyclic_reference_handling(),
        policy.enum_comparison(),
        policy.includes_all_public_properties(),
    );
    s
}

/// Compute a deterministic UUIDv5 for an effective policy.
#[must_use]
pub fn policy_id(policy: &EffectivePolicy) -> Uuid {
    Uuid::new_v5(&namespace(), serialize_policy(policy).as_bytes())
}
