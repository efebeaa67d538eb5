use std::ops::Deref;
use std::sync::Arc;

use super::effective::EffectivePolicy;
use super::restriction::Restriction;
use super::rule_list::RuleList;
use crate::logging::AuditSink;
use crate::rules::{
    AllPublicPropertiesRule, AssertionAction, AssertionContext, AssertionRuleStep,
    ByteSequenceOrderingRule, EquivalencyStep, ExcludeMemberRule, IncludeMemberRule,
    MatchAllOrderingRule, MatchingRule, MemberPredicate, MustMatchByNameRule, OrderingRule,
    PredicateOrderingRule, SelectionRule, TryMatchByNameRule,
};
use crate::types::{CyclicReferenceHandling, EnumComparison};

/// Policy governing how a subject graph is compared with an expectation graph.
///
/// `EquivalencyPolicy` is a mutable builder: every method mutates this instance
/// and returns `&mut Self`, so later calls override earlier state. Cloning copies
/// every switch and rule list by value; mutating a clone never affects its source.
/// Read access (rule lists, switches, `describe()`) goes through
/// [`EffectivePolicy`] via `Deref`, or through a snapshot from [`freeze`](Self::freeze).
///
/// # Example
/// ```rust
/// use equivalency::policy::EquivalencyPolicy;
/// use equivalency::rules::MemberPredicate;
///
/// let mut policy = EquivalencyPolicy::new();
/// policy
///     .excluding(MemberPredicate::name_is("Id"))
///     .including_nested_objects()
///     .with_strict_ordering();
/// assert!(policy.describe().contains("Exclude member when member.name == \"Id\""));
/// let frozen = policy.freeze();
/// assert!(frozen.is_recursive());
/// ```
#[derive(Clone, Debug)]
pub struct EquivalencyPolicy {
    inner: EffectivePolicy,
}

impl Default for EquivalencyPolicy {
    fn default() -> Self {
        let mut matching_rules: RuleList<dyn MatchingRule> = RuleList::new();
        matching_rules.insert_at_head(Arc::new(MustMatchByNameRule));
        let mut ordering_rules: RuleList<dyn OrderingRule> = RuleList::new();
        ordering_rules.insert_at_tail(Arc::new(ByteSequenceOrderingRule));
        Self {
            inner: EffectivePolicy {
                selection_rules: RuleList::new(),
                matching_rules,
                ordering_rules,
                user_steps: RuleList::new(),
                recursive: false,
                allow_infinite_recursion: false,
                cyclic_reference_handling: CyclicReferenceHandling::ThrowException,
                enum_comparison: EnumComparison::ByValue,
                use_runtime_type: false,
                include_all_public_properties: false,
                trace_sink: None,
            },
        }
    }
}

impl Deref for EquivalencyPolicy {
    type Target = EffectivePolicy;

    fn deref(&self) -> &EffectivePolicy {
        &self.inner
    }
}

impl EquivalencyPolicy {
    /// Construct a policy with the hard-coded defaults: no selection rules,
    /// must-match-by-name, strict ordering for byte sequences, no recursion,
    /// fail on cycles, enums by value, declared types.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the process-wide defaults (see [`crate::policy::defaults`]).
    #[must_use]
    pub fn from_defaults() -> Self {
        super::defaults::equivalency_defaults()
    }

    /// Immutable snapshot for the comparator. Later mutation of `self` does not reach it.
    #[must_use]
    pub fn freeze(&self) -> Arc<EffectivePolicy> {
        log::debug!(
            target: "equivalency",
            "freezing policy: {} selection, {} matching, {} ordering, {} steps",
            self.inner.selection_rules.len(),
            self.inner.matching_rules.len(),
            self.inner.ordering_rules.len(),
            self.inner.user_steps.len()
        );
        Arc::new(self.inner.clone())
    }

    /// Remove members for which `predicate` holds.
    pub fn excluding(&mut self, predicate: MemberPredicate) -> &mut Self {
        self.add_selection_rule(Arc::new(ExcludeMemberRule::new(predicate)))
    }

    /// Compare only members matching one of the include predicates. The
    /// canonical all-public-properties rule is dropped and its flag cleared.
    ///
    /// The first call appends an include rule; later calls add their predicate
    /// to it in place, so the included members are the union.
    pub fn including(&mut self, predicate: MemberPredicate) -> &mut Self {
        self.inner.include_all_public_properties = false;
        self.inner
            .selection_rules
            .retain(|r| !r.selects_all_public_properties());

        let existing = self
            .inner
            .selection_rules
            .iter()
            .enumerate()
            .find_map(|(index, r)| r.include_predicates().map(|p| (index, p.to_vec())));
        match existing {
            Some((index, mut predicates)) => {
                predicates.push(predicate);
                let rule = IncludeMemberRule::from_predicates(predicates);
                log::trace!(target: "equivalency", "selection rule (in place): {}", rule.description());
                self.inner.selection_rules.replace_at(index, Arc::new(rule));
                self
            }
            None => self.add_selection_rule(Arc::new(IncludeMemberRule::new(predicate))),
        }
    }

    pub fn requiring_exact_name_match(&mut self) -> &mut Self {
        self.replace_matching_rules(Arc::new(MustMatchByNameRule))
    }

    pub fn excluding_missing_members(&mut self) -> &mut Self {
        self.replace_matching_rules(Arc::new(TryMatchByNameRule))
    }

    pub fn including_nested_objects(&mut self) -> &mut Self {
        self.inner.recursive = true;
        self
    }

    /// Members of non-simple types are compared with equality instead of member by member.
    pub fn excluding_nested_objects(&mut self) -> &mut Self {
        self.inner.recursive = false;
        self
    }

    pub fn ignoring_cyclic_references(&mut self) -> &mut Self {
        self.inner.cyclic_reference_handling = CyclicReferenceHandling::Ignore;
        self
    }

    /// Disable the `MAX_RECURSION_DEPTH` limit for recursive comparisons.
    pub fn allowing_infinite_recursion(&mut self) -> &mut Self {
        self.inner.allow_infinite_recursion = true;
        self
    }

    pub fn including_all_declared_properties(&mut self) -> &mut Self {
        self.inner.use_runtime_type = false;
        self.inner.include_all_public_properties = true;
        self.regenerate_selection_rules();
        self
    }

    pub fn including_all_runtime_properties(&mut self) -> &mut Self {
        self.inner.use_runtime_type = true;
        self.inner.include_all_public_properties = true;
        self.regenerate_selection_rules();
        self
    }

    /// Flip to runtime typing without touching the selection rules.
    pub fn respecting_runtime_types(&mut self) -> &mut Self {
        self.inner.use_runtime_type = true;
        self
    }

    /// Flip to declared typing without touching the selection rules.
    pub fn respecting_declared_types(&mut self) -> &mut Self {
        self.inner.use_runtime_type = false;
        self
    }

    /// Append a selection rule; it runs after every rule already registered.
    pub fn using_selection_rule(&mut self, rule: Arc<dyn SelectionRule>) -> &mut Self {
        self.add_selection_rule(rule)
    }

    /// Prepend a matching rule; it is tried before every rule already registered.
    pub fn using_matching_rule(&mut self, rule: Arc<dyn MatchingRule>) -> &mut Self {
        log::trace!(target: "equivalency", "matching rule (head): {}", rule.description());
        self.inner.matching_rules.insert_at_head(rule);
        self
    }

    /// Append an ordering rule; earlier rules keep precedence.
    pub fn using_ordering_rule(&mut self, rule: Arc<dyn OrderingRule>) -> &mut Self {
        log::trace!(target: "equivalency", "ordering rule (tail): {}", rule.description());
        self.inner.ordering_rules.insert_at_tail(rule);
        self
    }

    /// Prepend a comparison step; the newest step gets the first chance to claim a member.
    pub fn using_step(&mut self, step: Arc<dyn EquivalencyStep>) -> &mut Self {
        log::trace!(target: "equivalency", "step (head): {}", step.description());
        self.inner.user_steps.insert_at_head(step);
        self
    }

    /// Wrap `(predicate, action)` into a comparison step with head precedence.
    pub fn using_assertion_rule<T, F>(&mut self, predicate: MemberPredicate, action: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&AssertionContext<'_, T>) -> Result<(), String> + Send + Sync + 'static,
    {
        let action: AssertionAction<T> = Arc::new(action);
        self.using_step(Arc::new(AssertionRuleStep::new(predicate, action)))
    }

    /// Start a scoped override; finish it with `for_type` or `for_predicate`.
    pub fn using<T, F>(&mut self, action: F) -> Restriction<'_, T>
    where
        T: 'static,
        F: Fn(&AssertionContext<'_, T>) -> Result<(), String> + Send + Sync + 'static,
    {
        Restriction::new(self, Arc::new(action))
    }

    pub fn with_strict_ordering(&mut self) -> &mut Self {
        self.using_ordering_rule(Arc::new(MatchAllOrderingRule))
    }

    pub fn with_strict_ordering_for(&mut self, predicate: MemberPredicate) -> &mut Self {
        self.using_ordering_rule(Arc::new(PredicateOrderingRule::strict(predicate)))
    }

    /// Drop every ordering rule, including the byte sequence default.
    pub fn without_strict_ordering(&mut self) -> &mut Self {
        self.inner.ordering_rules.clear();
        self
    }

    pub fn without_strict_ordering_for(&mut self, predicate: MemberPredicate) -> &mut Self {
        self.using_ordering_rule(Arc::new(PredicateOrderingRule::not_strict(predicate)))
    }

    pub fn comparing_enums_by_name(&mut self) -> &mut Self {
        self.inner.enum_comparison = EnumComparison::ByName;
        self
    }

    pub fn comparing_enums_by_value(&mut self) -> &mut Self {
        self.inner.enum_comparison = EnumComparison::ByValue;
        self
    }

    /// Empty the selection rules. Forces declared typing and marks all public
    /// properties as included without re-inserting the canonical rule.
    pub fn without_selection_rules(&mut self) -> &mut Self {
        self.inner.selection_rules.clear();
        self.inner.use_runtime_type = false;
        self.inner.include_all_public_properties = true;
        self
    }

    /// Empty the matching rules; every member then reports "no match".
    pub fn without_matching_rules(&mut self) -> &mut Self {
        self.inner.matching_rules.clear();
        self
    }

    /// Report rule decisions made during evaluation to `sink`.
    pub fn with_tracing(&mut self, sink: Arc<dyn AuditSink>) -> &mut Self {
        self.inner.trace_sink = Some(sink);
        self
    }

    fn add_selection_rule(&mut self, rule: Arc<dyn SelectionRule>) -> &mut Self {
        log::trace!(target: "equivalency", "selection rule (tail): {}", rule.description());
        self.inner.selection_rules.insert_at_tail(rule);
        self
    }

    fn replace_matching_rules(&mut self, rule: Arc<dyn MatchingRule>) -> &mut Self {
        self.inner.matching_rules.clear();
        self.inner.matching_rules.insert_at_head(rule);
        self
    }

    // Rebuild, not add/remove: custom selection rules do not survive.
    fn regenerate_selection_rules(&mut self) {
        self.inner.selection_rules.clear();
        if self.inner.include_all_public_properties {
            let canonical = if self.inner.use_runtime_type {
                AllPublicPropertiesRule::runtime()
            } else {
                AllPublicPropertiesRule::declared()
            };
            self.inner.selection_rules.insert_at_tail(Arc::new(canonical));
        }
    }
}
