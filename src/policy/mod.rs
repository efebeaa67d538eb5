//! Equivalency policy: configuration, read-only view and process-wide defaults.
//!
//! Consumers typically start from [`EquivalencyPolicy::new`] (hard-coded
//! defaults) or [`EquivalencyPolicy::from_defaults`] (clone of the process-wide
//! defaults), chain mutators, then hand [`EquivalencyPolicy::freeze`] to the
//! comparator.
//!
//! Submodules:
//! - `config`: the mutable builder and its regeneration/coupling rules
//! - `effective`: read-only view, `describe()`, rule evaluation helpers
//! - `restriction`: scoped `using(action).for_type::<T>()` overrides
//! - `rule_list`: ordered sequences with head/tail insertion
//! - `defaults`: process-wide defaults

pub mod config;
pub mod defaults;
pub mod effective;
pub mod restriction;
pub mod rule_list;

pub use config::EquivalencyPolicy;
pub use defaults::{assert_equivalency_using, equivalency_defaults, reset_equivalency_defaults};
pub use effective::EffectivePolicy;
pub use restriction::Restriction;
pub use rule_list::RuleList;
