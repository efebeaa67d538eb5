use equivalency::policy::EquivalencyPolicy;
use equivalency::rules::{AssertionContext, MemberPredicate, StepContext, StepOutcome};
use equivalency::types::{EquivalencyError, MemberInfo, MemberPath, TypeTag};

use crate::common::Customer;

trait Money {}
struct Euro;

fn close_enough(ctx: &AssertionContext<'_, f64>) -> Result<(), String> {
    if (ctx.subject - ctx.expectation).abs() <= 0.01 {
        Ok(())
    } else {
        Err(format!("{} differs from {}", ctx.subject, ctx.expectation))
    }
}

#[test]
fn for_type_registers_a_head_step_and_returns_the_policy() {
    let mut policy = EquivalencyPolicy::new();
    policy
        .using(close_enough)
        .for_type::<f64>()
        .including_nested_objects();

    assert!(policy.is_recursive());
    assert_eq!(policy.user_steps().len(), 1);
    assert_eq!(
        policy.user_steps()[0].description(),
        "Invoke action for f64 when member.runtime_type is f64"
    );

    let root = MemberPath::root();
    let price = MemberInfo::property(&root, "Price", TypeTag::of::<Customer>(), TypeTag::of::<f64>());
    let ok = policy.run_steps(&StepContext { member: &price, subject: &10.001_f64, expectation: &10.0_f64 });
    assert_eq!(ok, StepOutcome::Handled(Ok(())));

    let bad = policy.run_steps(&StepContext { member: &price, subject: &11.0_f64, expectation: &10.0_f64 });
    assert!(matches!(
        bad,
        StepOutcome::Handled(Err(EquivalencyError::Mismatch { ref path, .. })) if path == "Price"
    ));
}

#[test]
fn for_type_matches_declared_supertypes() {
    let mut policy = EquivalencyPolicy::new();
    policy.using(|_: &AssertionContext<'_, u32>| Ok(())).for_type::<dyn Money>();

    let root = MemberPath::root();
    let amount = MemberInfo::property(
        &root,
        "Amount",
        TypeTag::of::<Customer>(),
        TypeTag::of::<Euro>().with_supertype::<dyn Money>(),
    );
    let out = policy.run_steps(&StepContext { member: &amount, subject: &5_u32, expectation: &5_u32 });
    assert!(out.is_handled());
}

#[test]
fn for_predicate_overrides_earlier_restrictions() {
    let mut policy = EquivalencyPolicy::new();
    policy
        .using(|_: &AssertionContext<'_, String>| Err("first".to_string()))
        .for_predicate(MemberPredicate::any())
        .using(|_: &AssertionContext<'_, String>| Err("second".to_string()))
        .for_predicate(MemberPredicate::name_is("Name"));

    let root = MemberPath::root();
    let name = MemberInfo::property(&root, "Name", TypeTag::of::<Customer>(), TypeTag::of::<String>());
    let s = String::from("x");
    let out = policy.run_steps(&StepContext { member: &name, subject: &s, expectation: &s });
    assert_eq!(
        out,
        StepOutcome::Handled(Err(EquivalencyError::Mismatch {
            path: "Name".into(),
            message: "second".into(),
        }))
    );

    let other = MemberInfo::property(&root, "Email", TypeTag::of::<Customer>(), TypeTag::of::<String>());
    let out = policy.run_steps(&StepContext { member: &other, subject: &s, expectation: &s });
    assert_eq!(
        out,
        StepOutcome::Handled(Err(EquivalencyError::Mismatch {
            path: "Email".into(),
            message: "first".into(),
        }))
    );
}

#[test]
fn steps_decline_when_values_have_another_type() {
    let mut policy = EquivalencyPolicy::new();
    policy.using(close_enough).for_predicate(MemberPredicate::any());
    let root = MemberPath::root();
    let name = MemberInfo::property(&root, "Name", TypeTag::of::<Customer>(), TypeTag::of::<String>());
    let s = String::from("x");
    let out = policy.run_steps(&StepContext { member: &name, subject: &s, expectation: &s });
    assert_eq!(out, StepOutcome::Declined);
}
