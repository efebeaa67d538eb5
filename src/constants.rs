//! Shared crate-wide constants for equivalency policies.
//!
//! Centralizes default limits and labels used across modules.
//! Adjusting these here will propagate through the crate.

/// Maximum member depth the comparator may descend into when recursion is on and
/// `allowing_infinite_recursion()` was not requested. See `EffectivePolicy::check_depth`.
pub const MAX_RECURSION_DEPTH: usize = 10;

/// UUIDv5 namespace tag for deterministic policy IDs.
pub const NS_TAG: &str = "https://equivalency.rs/policy";

/// Version of the structured fact envelope emitted by `EffectivePolicy::emit_facts`.
pub const SCHEMA_VERSION: i64 = 1;

/// Subsystem label attached to every emitted fact.
pub const FACTS_SUBSYSTEM: &str = "equivalency";

/// Label used by `MemberPath` for the comparison root.
pub const ROOT_LABEL: &str = "root";
