#![forbid(unsafe_code)]
//! Equivalency: configurable policies for structural comparison of object graphs.
//!
//! Model highlights:
//! - An [`EquivalencyPolicy`](policy::EquivalencyPolicy) is a mutable builder owning four ordered
//!   rule lists (selection, matching, ordering, comparison steps) and six switches.
//! - Precedence is fixed per kind: selection and ordering rules append (first registered runs
//!   first), matching rules and comparison steps prepend (last registered is tried first).
//! - The recursive comparator is external; it reads a frozen
//!   [`EffectivePolicy`](policy::EffectivePolicy) and evaluates it with the helpers there.
//! - Member metadata comes from the caller's reflection layer as [`MemberInfo`](types::MemberInfo);
//!   rules never look at values, except comparison steps.

pub mod constants;
pub mod logging;
pub mod policy;
pub mod rules;
pub mod types;

pub use policy::{EffectivePolicy, EquivalencyPolicy};
pub use rules::MemberPredicate;
pub use types::{EquivalencyError, Result};
