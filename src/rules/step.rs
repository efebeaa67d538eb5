//! User-supplied comparison overrides.
//!
//! An [`AssertionRuleStep`] pairs a member predicate with a typed action. It
//! claims a member when the predicate holds and both values are a `T`; the
//! action's verdict then replaces the default recursive/equality check.
use std::marker::PhantomData;
use std::sync::Arc;

use super::{EquivalencyStep, MemberPredicate, StepContext, StepOutcome};
use crate::types::{EquivalencyError, MemberInfo};

/// What a typed assertion action sees for one member.
#[derive(Debug)]
pub struct AssertionContext<'a, T> {
    pub member: &'a MemberInfo,
    pub subject: &'a T,
    pub expectation: &'a T,
}

/// Compares the two values; `Err` carries the mismatch message.
pub type AssertionAction<T> = Arc<dyn Fn(&AssertionContext<'_, T>) -> Result<(), String> + Send + Sync>;

pub struct AssertionRuleStep<T> {
    predicate: MemberPredicate,
    action: AssertionAction<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> AssertionRuleStep<T> {
    #[must_use]
    pub fn new(predicate: MemberPredicate, action: AssertionAction<T>) -> Self {
        Self {
            predicate,
            action,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> EquivalencyStep for AssertionRuleStep<T> {
    fn handle(&self, ctx: &StepContext<'_>) -> StepOutcome {
        if !self.predicate.matches(ctx.member) {
            return StepOutcome::Declined;
        }
        let (Some(subject), Some(expectation)) = (
            ctx.subject.downcast_ref::<T>(),
            ctx.expectation.downcast_ref::<T>(),
        ) else {
            return StepOutcome::Declined;
        };
        let assertion = AssertionContext {
            member: ctx.member,
            subject,
            expectation,
        };
        StepOutcome::Handled((self.action)(&assertion).map_err(|message| {
            EquivalencyError::Mismatch {
                path: ctx.member.path.to_string(),
                message,
            }
        }))
    }

    fn description(&self) -> String {
        format!(
            "Invoke action for {} when {}",
            std::any::type_name::<T>(),
            self.predicate
        )
    }
}
