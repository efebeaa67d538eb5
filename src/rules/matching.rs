use super::{MatchContext, MatchOutcome, MatchingRule};
use crate::types::{EquivalencyError, MemberInfo};

fn by_name<'a>(expectation_member: &MemberInfo, subject_members: &'a [MemberInfo]) -> Option<&'a MemberInfo> {
    subject_members.iter().find(|m| m.name == expectation_member.name)
}

/// Seeded by default: an expectation member without a same-named subject member fails the comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MustMatchByNameRule;

impl MatchingRule for MustMatchByNameRule {
    fn find_match(
        &self,
        expectation_member: &MemberInfo,
        subject_members: &[MemberInfo],
        _ctx: &MatchContext<'_>,
    ) -> MatchOutcome {
        match by_name(expectation_member, subject_members) {
            Some(m) => MatchOutcome::Found(m.clone()),
            None => MatchOutcome::Failed(EquivalencyError::MissingMember {
                path: expectation_member.path.to_string(),
            }),
        }
    }

    fn description(&self) -> String {
        "Match member by name (or fail)".to_string()
    }
}

/// Installed by `excluding_missing_members()`: missing subject members are skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TryMatchByNameRule;

impl MatchingRule for TryMatchByNameRule {
    fn find_match(
        &self,
        expectation_member: &MemberInfo,
        subject_members: &[MemberInfo],
        _ctx: &MatchContext<'_>,
    ) -> MatchOutcome {
        by_name(expectation_member, subject_members)
            .map_or(MatchOutcome::NotFound, |m| MatchOutcome::Found(m.clone()))
    }

    fn description(&self) -> String {
        "Try to match member by name".to_string()
    }
}
