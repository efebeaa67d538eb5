use super::{MemberPredicate, SelectionContext, SelectionRule};
use crate::types::MemberInfo;

/// Canonical rule installed while `include_all_public_properties` is on.
///
/// Keeps public properties declared on the chosen type (declared or runtime)
/// or on one of its supertypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllPublicPropertiesRule {
    runtime: bool,
}

impl AllPublicPropertiesRule {
    #[must_use]
    pub const fn declared() -> Self {
        Self { runtime: false }
    }

    #[must_use]
    pub const fn runtime() -> Self {
        Self { runtime: true }
    }

    #[must_use]
    pub const fn uses_runtime_type(&self) -> bool {
        self.runtime
    }
}

impl SelectionRule for AllPublicPropertiesRule {
    fn select_members(&self, members: Vec<MemberInfo>, ctx: &SelectionContext<'_>) -> Vec<MemberInfo> {
        let ty = if self.runtime { ctx.runtime_type } else { ctx.compile_time_type };
        members
            .into_iter()
            .filter(|m| m.is_public_property() && ty.is_assignable_to(&m.declaring_type))
            .collect()
    }

    fn description(&self) -> String {
        if self.runtime {
            "Include all public properties of the runtime type".to_string()
        } else {
            "Include all public properties of the declared type".to_string()
        }
    }

    fn selects_all_public_properties(&self) -> bool {
        true
    }
}

#[derive(Clone, Debug)]
pub struct ExcludeMemberRule {
    predicate: MemberPredicate,
}

impl ExcludeMemberRule {
    #[must_use]
    pub fn new(predicate: MemberPredicate) -> Self {
        Self { predicate }
    }
}

impl SelectionRule for ExcludeMemberRule {
    fn select_members(&self, members: Vec<MemberInfo>, _ctx: &SelectionContext<'_>) -> Vec<MemberInfo> {
        members.into_iter().filter(|m| !self.predicate.matches(m)).collect()
    }

    fn description(&self) -> String {
        format!("Exclude member when {}", self.predicate)
    }
}

/// Narrows the selection to members matching at least one predicate.
///
/// `including` keeps a single instance of this rule and adds predicates to it,
/// so repeated calls widen the union instead of intersecting.
#[derive(Clone, Debug)]
pub struct IncludeMemberRule {
    predicates: Vec<MemberPredicate>,
}

impl IncludeMemberRule {
    #[must_use]
    pub fn new(predicate: MemberPredicate) -> Self {
        Self {
            predicates: vec![predicate],
        }
    }

    #[must_use]
    pub fn or(mut self, predicate: MemberPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub(crate) fn from_predicates(predicates: Vec<MemberPredicate>) -> Self {
        Self { predicates }
    }
}

impl SelectionRule for IncludeMemberRule {
    fn select_members(&self, members: Vec<MemberInfo>, _ctx: &SelectionContext<'_>) -> Vec<MemberInfo> {
        members
            .into_iter()
            .filter(|m| self.predicates.iter().any(|p| p.matches(m)))
            .collect()
    }

    fn description(&self) -> String {
        let when: Vec<&str> = self.predicates.iter().map(MemberPredicate::description).collect();
        format!("Include member when {}", when.join(" || "))
    }

    fn include_predicates(&self) -> Option<&[MemberPredicate]> {
        Some(&self.predicates)
    }
}
