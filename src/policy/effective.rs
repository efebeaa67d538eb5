//! Read-only view of a policy, as consumed by the recursive comparator.
//!
//! The comparator reads rule lists and switches through this type only and
//! evaluates them with the helpers below, so every comparator applies the
//! same precedence:
//! - selection rules form a pipeline over the candidate members
//! - matching rules and comparison steps: first claim wins
//! - ordering rules: first verdict wins, none means order-insensitive
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use log::Level;
use uuid::Uuid;

use super::rule_list::RuleList;
use crate::constants::MAX_RECURSION_DEPTH;
use crate::logging::{audit, AuditSink, FactsEmitter};
use crate::rules::{
    EquivalencyStep, MatchContext, MatchOutcome, MatchingRule, OrderingRule, SelectionContext,
    SelectionRule, StepContext, StepOutcome,
};
use crate::types::{
    policy_id, CycleAction, CyclicReferenceHandling, EnumComparison, EquivalencyError, MemberInfo,
    MemberPath, OrderStrictness, Result,
};

#[derive(Clone)]
pub struct EffectivePolicy {
    pub(crate) selection_rules: RuleList<dyn SelectionRule>,
    pub(crate) matching_rules: RuleList<dyn MatchingRule>,
    pub(crate) ordering_rules: RuleList<dyn OrderingRule>,
    pub(crate) user_steps: RuleList<dyn EquivalencyStep>,
    pub(crate) recursive: bool,
    pub(crate) allow_infinite_recursion: bool,
    pub(crate) cyclic_reference_handling: CyclicReferenceHandling,
    pub(crate) enum_comparison: EnumComparison,
    pub(crate) use_runtime_type: bool,
    pub(crate) include_all_public_properties: bool,
    pub(crate) trace_sink: Option<Arc<dyn AuditSink>>,
}

impl EffectivePolicy {
    pub fn selection_rules(&self) -> &[Arc<dyn SelectionRule>] {
        self.selection_rules.as_slice()
    }

    pub fn matching_rules(&self) -> &[Arc<dyn MatchingRule>] {
        self.matching_rules.as_slice()
    }

    pub fn ordering_rules(&self) -> &[Arc<dyn OrderingRule>] {
        self.ordering_rules.as_slice()
    }

    pub fn user_steps(&self) -> &[Arc<dyn EquivalencyStep>] {
        self.user_steps.as_slice()
    }

    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    #[must_use]
    pub fn allows_infinite_recursion(&self) -> bool {
        self.allow_infinite_recursion
    }

    #[must_use]
    pub fn cyclic_reference_handling(&self) -> CyclicReferenceHandling {
        self.cyclic_reference_handling
    }

    #[must_use]
    pub fn enum_comparison(&self) -> EnumComparison {
        self.enum_comparison
    }

    #[must_use]
    pub fn uses_runtime_type(&self) -> bool {
        self.use_runtime_type
    }

    #[must_use]
    pub fn includes_all_public_properties(&self) -> bool {
        self.include_all_public_properties
    }

    pub fn trace_sink(&self) -> Option<&Arc<dyn AuditSink>> {
        self.trace_sink.as_ref()
    }

    fn trace(&self, level: Level, msg: impl FnOnce() -> String) {
        if let Some(sink) = &self.trace_sink {
            sink.log(level, &msg());
        }
    }

    /// Run the selection pipeline. The first rule receives `ctx.candidates`,
    /// each later rule the previous output; with no rules the candidates pass through.
    #[must_use]
    pub fn select_members(&self, ctx: &SelectionContext<'_>) -> Vec<MemberInfo> {
        let mut members = ctx.candidates.to_vec();
        for rule in &self.selection_rules {
            let before = members.len();
            members = rule.select_members(members, ctx);
            self.trace(Level::Trace, || {
                format!(
                    "{}: {} ({} -> {} members)",
                    ctx.path,
                    rule.description(),
                    before,
                    members.len()
                )
            });
        }
        members
    }

    /// Try matching rules in order; the first `Found` or `Failed` wins.
    /// No rules, or no rule with an opinion, yields `NotFound`.
    #[must_use]
    pub fn find_match(
        &self,
        expectation_member: &MemberInfo,
        subject_members: &[MemberInfo],
        ctx: &MatchContext<'_>,
    ) -> MatchOutcome {
        for rule in &self.matching_rules {
            match rule.find_match(expectation_member, subject_members, ctx) {
                MatchOutcome::NotFound => continue,
                MatchOutcome::Found(found) => {
                    self.trace(Level::Trace, || {
                        format!(
                            "{}: matched {} by {}",
                            expectation_member.path,
                            found.path,
                            rule.description()
                        )
                    });
                    return MatchOutcome::Found(found);
                }
                MatchOutcome::Failed(err) => {
                    self.trace(Level::Debug, || {
                        format!("{}: failed by {}: {err}", expectation_member.path, rule.description())
                    });
                    return MatchOutcome::Failed(err);
                }
            }
        }
        self.trace(Level::Debug, || {
            format!("{}: no matching rule found a subject member", expectation_member.path)
        });
        MatchOutcome::NotFound
    }

    /// First ordering rule with a verdict wins; without one, order is ignored.
    #[must_use]
    pub fn ordering_for(&self, member: &MemberInfo) -> OrderStrictness {
        self.ordering_rules
            .iter()
            .find_map(|rule| rule.strictness(member))
            .unwrap_or_default()
    }

    /// Offer the member to the user steps in order. `Declined` means the
    /// comparator must run its default recursive/equality algorithm.
    #[must_use]
    pub fn run_steps(&self, ctx: &StepContext<'_>) -> StepOutcome {
        for step in &self.user_steps {
            let outcome = step.handle(ctx);
            if outcome.is_handled() {
                self.trace(Level::Debug, || {
                    format!("{}: handled by {}", ctx.member.path, step.description())
                });
                return outcome;
            }
        }
        StepOutcome::Declined
    }

    /// Fail with `RecursionLimit` when recursion is on, unbounded recursion was not
    /// allowed, and `path` is deeper than `MAX_RECURSION_DEPTH`.
    pub fn check_depth(&self, path: &MemberPath) -> Result<()> {
        if self.recursive && !self.allow_infinite_recursion && path.depth() > MAX_RECURSION_DEPTH {
            self.trace(Level::Warn, || format!("{path}: recursion limit reached"));
            return Err(EquivalencyError::RecursionLimit {
                path: path.to_string(),
                max_depth: MAX_RECURSION_DEPTH,
            });
        }
        Ok(())
    }

    /// Decide what happens when the node at `path` is already on the traversal path.
    pub fn on_cyclic_reference(&self, path: &MemberPath) -> Result<CycleAction> {
        match self.cyclic_reference_handling {
            CyclicReferenceHandling::ThrowException => Err(EquivalencyError::CyclicReference {
                path: path.to_string(),
            }),
            CyclicReferenceHandling::Ignore => {
                self.trace(Level::Debug, || format!("{path}: ignoring cyclic reference"));
                Ok(CycleAction::TreatAsEqual)
            }
        }
    }

    /// Human-readable summary in evaluation order: typing mode, selection rules,
    /// matching rules, then user steps. One `- ` prefixed line each.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let typing = if self.use_runtime_type { "runtime" } else { "declared" };
        let _ = writeln!(out, "- Use {typing} types and members");
        for rule in &self.selection_rules {
            let _ = writeln!(out, "- {}", rule.description());
        }
        for rule in &self.matching_rules {
            let _ = writeln!(out, "- {}", rule.description());
        }
        for step in &self.user_steps {
            let _ = writeln!(out, "- {}", step.description());
        }
        out
    }

    #[must_use]
    pub fn policy_id(&self) -> Uuid {
        policy_id(self)
    }

    /// Emit a `policy.effective` fact summarizing switches and rules.
    pub fn emit_facts(&self, facts: &dyn FactsEmitter) {
        audit::emit_policy(facts, "policy.effective", self);
    }
}

impl fmt::Debug for EffectivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectivePolicy")
            .field("selection_rules", &self.selection_rules.len())
            .field("matching_rules", &self.matching_rules.len())
            .field("ordering_rules", &self.ordering_rules.len())
            .field("user_steps", &self.user_steps.len())
            .field("recursive", &self.recursive)
            .field("allow_infinite_recursion", &self.allow_infinite_recursion)
            .field("cyclic_reference_handling", &self.cyclic_reference_handling)
            .field("enum_comparison", &self.enum_comparison)
            .field("use_runtime_type", &self.use_runtime_type)
            .field("include_all_public_properties", &self.include_all_public_properties)
            .field("tracing", &self.trace_sink.is_some())
            .finish()
    }
}

impl fmt::Display for EffectivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
