use serde::{Deserialize, Serialize};

/// What the comparator does when it meets a node already on the current traversal path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclicReferenceHandling {
    /// Raise `EquivalencyError::CyclicReference`.
    #[default]
    ThrowException,
    /// Do not descend again; treat the repeated node as equal.
    Ignore,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumComparison {
    #[default]
    ByValue,
    ByName,
}

/// Verdict of an ordering rule for one collection member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStrictness {
    Strict,
    #[default]
    NotStrict,
}

/// Returned by `EffectivePolicy::on_cyclic_reference` when cycles are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleAction {
    TreatAsEqual,
}
