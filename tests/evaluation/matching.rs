use std::sync::Arc;

use equivalency::policy::EquivalencyPolicy;
use equivalency::rules::{MatchContext, MatchOutcome, MatchingRule};
use equivalency::types::{EquivalencyError, MemberInfo, MemberPath, TypeTag};

use crate::common::{customer_members, member_named, Customer};

/// Matches expectation members to subject members with a different casing.
struct CaseInsensitive;

impl MatchingRule for CaseInsensitive {
    fn find_match(
        &self,
        expectation_member: &MemberInfo,
        subject_members: &[MemberInfo],
        _ctx: &MatchContext<'_>,
    ) -> MatchOutcome {
        subject_members
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(&expectation_member.name))
            .map_or(MatchOutcome::NotFound, |m| MatchOutcome::Found(m.clone()))
    }

    fn description(&self) -> String {
        "Match member by name ignoring case".to_string()
    }
}

fn subject() -> Vec<MemberInfo> {
    customer_members(&MemberPath::root())
}

fn expectation_member(name: &str) -> MemberInfo {
    MemberInfo::property(&MemberPath::root(), name, TypeTag::of::<Customer>(), TypeTag::of::<String>())
}

#[test]
fn default_rule_fails_on_missing_member() {
    let root = MemberPath::root();
    let ty = TypeTag::of::<Customer>();
    let ctx = MatchContext { path: &root, subject_type: &ty };
    let policy = EquivalencyPolicy::new();
    let subject = subject();

    assert_eq!(
        policy.find_match(&expectation_member("Name"), &subject, &ctx),
        MatchOutcome::Found(member_named(&subject, "Name").clone())
    );
    assert_eq!(
        policy.find_match(&expectation_member("Nickname"), &subject, &ctx),
        MatchOutcome::Failed(EquivalencyError::MissingMember { path: "Nickname".into() })
    );
}

#[test]
fn allowing_missing_members_skips_them() {
    let root = MemberPath::root();
    let ty = TypeTag::of::<Customer>();
    let ctx = MatchContext { path: &root, subject_type: &ty };
    let mut policy = EquivalencyPolicy::new();
    policy.excluding_missing_members();
    assert_eq!(
        policy.find_match(&expectation_member("Nickname"), &subject(), &ctx),
        MatchOutcome::NotFound
    );
}

#[test]
fn custom_rule_is_consulted_before_defaults() {
    let root = MemberPath::root();
    let ty = TypeTag::of::<Customer>();
    let ctx = MatchContext { path: &root, subject_type: &ty };
    let mut policy = EquivalencyPolicy::new();
    policy.using_matching_rule(Arc::new(CaseInsensitive));
    let subject = subject();

    assert_eq!(
        policy.find_match(&expectation_member("name"), &subject, &ctx),
        MatchOutcome::Found(member_named(&subject, "Name").clone())
    );
    // falls through to the default rule when the custom rule has no opinion
    assert!(matches!(
        policy.find_match(&expectation_member("Nickname"), &subject, &ctx),
        MatchOutcome::Failed(EquivalencyError::MissingMember { .. })
    ));
}

#[test]
fn zero_matching_rules_report_no_match_uniformly() {
    let root = MemberPath::root();
    let ty = TypeTag::of::<Customer>();
    let ctx = MatchContext { path: &root, subject_type: &ty };
    let mut policy = EquivalencyPolicy::new();
    policy.without_matching_rules();
    let subject = subject();
    for name in ["Name", "Nickname", "Id"] {
        assert_eq!(
            policy.find_match(&expectation_member(name), &subject, &ctx),
            MatchOutcome::NotFound
        );
    }
}
