//! Capability contracts for the four rule kinds a policy composes.
//!
//! Each kind is an independent trait; built-in rules are separate
//! implementations living in the submodules:
//! - `selection`: which members take part at all (pipeline)
//! - `matching`: which subject member answers an expectation member (first match)
//! - `ordering`: whether a collection member is order-sensitive (first verdict)
//! - `step`: user overrides that take over comparing one member (first claim)
//!
//! All rules are `Send + Sync` so a frozen policy can be shared between
//! concurrent comparisons.
use std::any::Any;

use crate::types::{EquivalencyError, MemberInfo, MemberPath, OrderStrictness, TypeTag};

pub mod matching;
pub mod ordering;
pub mod predicate;
pub mod selection;
pub mod step;

pub use matching::{MustMatchByNameRule, TryMatchByNameRule};
pub use ordering::{ByteSequenceOrderingRule, MatchAllOrderingRule, PredicateOrderingRule};
pub use predicate::MemberPredicate;
pub use selection::{AllPublicPropertiesRule, ExcludeMemberRule, IncludeMemberRule};
pub use step::{AssertionAction, AssertionContext, AssertionRuleStep};

/// Where in the graph members are being selected, and what the reflection layer offered.
#[derive(Clone, Copy, Debug)]
pub struct SelectionContext<'a> {
    pub path: &'a MemberPath,
    pub compile_time_type: &'a TypeTag,
    pub runtime_type: &'a TypeTag,
    /// Every member the reflection layer found, before any rule ran.
    pub candidates: &'a [MemberInfo],
}

pub trait SelectionRule: Send + Sync {
    /// Filter or augment the members produced by the previous rule.
    fn select_members(&self, members: Vec<MemberInfo>, ctx: &SelectionContext<'_>) -> Vec<MemberInfo>;

    fn description(&self) -> String;

    /// True only for the canonical rule that `include_all_public_properties` installs.
    fn selects_all_public_properties(&self) -> bool {
        false
    }

    /// Predicates of an include rule that `including` extends in place.
    fn include_predicates(&self) -> Option<&[MemberPredicate]> {
        None
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MatchContext<'a> {
    /// Path of the object whose members are being matched.
    pub path: &'a MemberPath,
    pub subject_type: &'a TypeTag,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Found(MemberInfo),
    /// This rule has no opinion; the next rule is tried.
    NotFound,
    /// This rule decided the comparison fails for the member.
    Failed(EquivalencyError),
}

pub trait MatchingRule: Send + Sync {
    fn find_match(
        &self,
        expectation_member: &MemberInfo,
        subject_members: &[MemberInfo],
        ctx: &MatchContext<'_>,
    ) -> MatchOutcome;

    fn description(&self) -> String;
}

pub trait OrderingRule: Send + Sync {
    /// `None` when the rule does not apply to `member`.
    fn strictness(&self, member: &MemberInfo) -> Option<OrderStrictness>;

    fn description(&self) -> String;
}

/// Values handed to a comparison step for one member.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub member: &'a MemberInfo,
    pub subject: &'a dyn Any,
    pub expectation: &'a dyn Any,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Fall through to the next step, then to the default recursive algorithm.
    Declined,
    /// The step compared the member; nothing else runs for it.
    Handled(Result<(), EquivalencyError>),
}

impl StepOutcome {
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, StepOutcome::Handled(_))
    }
}

pub trait EquivalencyStep: Send + Sync {
    fn handle(&self, ctx: &StepContext<'_>) -> StepOutcome;

    fn description(&self) -> String;
}
