use std::sync::Arc;

use super::config::EquivalencyPolicy;
use crate::rules::{AssertionAction, AssertionRuleStep, MemberPredicate};

/// Pending "use this action for members of ..." override.
///
/// Created by [`EquivalencyPolicy::using`]; finishing it registers an
/// [`AssertionRuleStep`] at the head of the user steps and hands the owning
/// policy back so the chain can continue.
///
/// ```rust
/// use equivalency::policy::EquivalencyPolicy;
/// use equivalency::rules::AssertionContext;
///
/// let mut policy = EquivalencyPolicy::new();
/// policy
///     .using(|ctx: &AssertionContext<'_, f64>| {
///         if (ctx.subject - ctx.expectation).abs() < 0.01 { Ok(()) } else { Err("too far".into()) }
///     })
///     .for_type::<f64>()
///     .including_nested_objects();
/// assert_eq!(policy.user_steps().len(), 1);
/// ```
#[must_use = "a restriction does nothing until `for_type` or `for_predicate` is called"]
pub struct Restriction<'a, T> {
    policy: &'a mut EquivalencyPolicy,
    action: AssertionAction<T>,
}

impl<'a, T: 'static> Restriction<'a, T> {
    pub(crate) fn new(policy: &'a mut EquivalencyPolicy, action: AssertionAction<T>) -> Self {
        Self { policy, action }
    }

    /// Apply the action to members whose runtime type is `U` or declares `U` as a supertype.
    pub fn for_type<U: ?Sized + 'static>(self) -> &'a mut EquivalencyPolicy {
        self.for_predicate(MemberPredicate::runtime_type_is::<U>())
    }

    pub fn for_predicate(self, predicate: MemberPredicate) -> &'a mut EquivalencyPolicy {
        let Self { policy, action } = self;
        policy.using_step(Arc::new(AssertionRuleStep::new(predicate, action)))
    }
}
