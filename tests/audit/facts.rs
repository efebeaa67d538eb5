use equivalency::constants::{FACTS_SUBSYSTEM, SCHEMA_VERSION};
use equivalency::logging::{LogSink, NullSink, PolicyFacts};
use equivalency::policy::EquivalencyPolicy;
use equivalency::rules::{AssertionContext, MemberPredicate};
use serde_json::{json, Value};

use crate::common::TestEmitter;

#[test]
fn effective_policy_fact_carries_envelope_and_rules() {
    let facts = TestEmitter::default();
    let mut policy = EquivalencyPolicy::new();
    policy
        .excluding(MemberPredicate::name_is("Id"))
        .including_nested_objects()
        .comparing_enums_by_name()
        .with_strict_ordering();
    let frozen = policy.freeze();
    frozen.emit_facts(&facts);

    let events = facts.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let (subsystem, event, decision, fields) = &events[0];
    assert_eq!(subsystem, FACTS_SUBSYSTEM);
    assert_eq!(event, "policy.effective");
    assert_eq!(decision, "success");

    assert_eq!(fields["schema_version"], json!(SCHEMA_VERSION));
    assert_eq!(fields["event"], json!("policy.effective"));
    assert_eq!(fields["policy_id"], json!(frozen.policy_id().to_string()));
    assert_eq!(fields["recursive"], Value::Bool(true));
    assert_eq!(fields["enum_comparison"], json!("by_name"));
    assert_eq!(fields["cyclic_reference_handling"], json!("throw_exception"));
    assert_eq!(
        fields["selection_rules"],
        json!(["Exclude member when member.name == \"Id\""])
    );
    assert_eq!(fields["matching_rules"], json!(["Match member by name (or fail)"]));
    assert_eq!(
        fields["ordering_rules"],
        json!([
            "Be strict about the order of items in byte sequences",
            "Be strict about the order of all collections"
        ])
    );
    assert_eq!(fields["user_steps"], json!([]));

    let mut keys: Vec<&str> = fields.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "allow_infinite_recursion",
            "cyclic_reference_handling",
            "enum_comparison",
            "event",
            "include_all_public_properties",
            "matching_rules",
            "ordering_rules",
            "policy_id",
            "recursive",
            "schema_version",
            "selection_rules",
            "use_runtime_type",
            "user_steps",
        ]
    );
}

#[test]
fn collected_facts_follow_rule_order() {
    let mut policy = EquivalencyPolicy::new();
    policy
        .excluding_missing_members()
        .using_assertion_rule(MemberPredicate::name_is("A"), |_: &AssertionContext<'_, u8>| Ok(()))
        .using_assertion_rule(MemberPredicate::name_is("B"), |_: &AssertionContext<'_, u8>| Ok(()));
    let summary = PolicyFacts::collect(&policy);
    assert_eq!(summary.matching_rules, vec!["Try to match member by name"]);
    assert_eq!(summary.user_steps.len(), 2);
    assert!(summary.user_steps[0].ends_with("when member.name == \"B\""));
    assert!(summary.user_steps[1].ends_with("when member.name == \"A\""));
}

#[test]
fn bundled_sinks_accept_facts() {
    let policy = EquivalencyPolicy::new();
    policy.emit_facts(&NullSink);
    policy.emit_facts(&LogSink);
}
