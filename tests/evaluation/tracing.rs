use std::sync::Arc;

use equivalency::policy::EquivalencyPolicy;
use equivalency::rules::{
    AssertionContext, MatchContext, MatchOutcome, MemberPredicate, SelectionContext, StepContext,
};
use equivalency::types::{MemberInfo, MemberPath, TypeTag};
use log::Level;

use crate::common::{customer_members, member_named, Customer, TestAudit};

#[test]
fn evaluation_helpers_report_to_the_trace_sink() {
    let audit = TestAudit::default();
    let mut policy = EquivalencyPolicy::new();
    policy
        .with_tracing(Arc::new(audit.clone()))
        .excluding(MemberPredicate::name_is("Id"))
        .ignoring_cyclic_references()
        .using(|_: &AssertionContext<'_, String>| Ok(()))
        .for_type::<String>();
    let frozen = policy.freeze();

    let root = MemberPath::root();
    let ty = TypeTag::of::<Customer>();
    let candidates = customer_members(&root);
    let ctx = SelectionContext {
        path: &root,
        compile_time_type: &ty,
        runtime_type: &ty,
        candidates: &candidates,
    };
    let selected = frozen.select_members(&ctx);
    assert_eq!(selected.len(), candidates.len() - 1);

    let name = member_named(&candidates, "Name");
    let s = String::from("Ada");
    let out = frozen.run_steps(&StepContext { member: name, subject: &s, expectation: &s });
    assert!(out.is_handled());

    let _ = frozen.on_cyclic_reference(&MemberPath::parse("Self.Self"));

    let messages = audit.messages();
    assert_eq!(messages.len(), 3, "{messages:?}");
    assert_eq!(
        messages[0],
        "root: Exclude member when member.name == \"Id\" (6 -> 5 members)"
    );
    assert!(messages[1].starts_with("Name: handled by Invoke action for alloc::string::String"));
    assert_eq!(messages[2], "Self.Self: ignoring cyclic reference");
    assert_eq!(audit.lines.lock().unwrap()[0].0, Level::Trace);
}

#[test]
fn no_sink_means_no_trace() {
    let policy = EquivalencyPolicy::new();
    assert!(policy.trace_sink().is_none());
    assert!(policy.on_cyclic_reference(&MemberPath::root()).is_err());
}

#[test]
fn matching_trace_tells_found_from_failed() {
    let audit = TestAudit::default();
    let mut policy = EquivalencyPolicy::new();
    policy.with_tracing(Arc::new(audit.clone()));

    let root = MemberPath::root();
    let ty = TypeTag::of::<Customer>();
    let ctx = MatchContext { path: &root, subject_type: &ty };
    let subject = customer_members(&root);
    let name = MemberInfo::property(&root, "Name", ty.clone(), TypeTag::of::<String>());
    let nickname = MemberInfo::property(&root, "Nickname", ty.clone(), TypeTag::of::<String>());

    assert!(matches!(policy.find_match(&name, &subject, &ctx), MatchOutcome::Found(_)));
    assert!(matches!(policy.find_match(&nickname, &subject, &ctx), MatchOutcome::Failed(_)));

    let lines = audit.lines.lock().unwrap().clone();
    assert_eq!(
        lines,
        vec![
            (Level::Trace, "Name: matched Name by Match member by name (or fail)".to_string()),
            (
                Level::Debug,
                "Nickname: failed by Match member by name (or fail): \
                 expectation has member Nickname that the subject does not have"
                    .to_string()
            ),
        ]
    );
}
