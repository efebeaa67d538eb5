// Structured facts describing an effective policy.
//
// Every fact carries a minimal envelope: `schema_version`, `policy_id`, `event`.
// Rule lists are reported by description, in evaluation order.
use serde::Serialize;
use serde_json::{json, Value};

use crate::constants::{FACTS_SUBSYSTEM, SCHEMA_VERSION};
use crate::logging::FactsEmitter;
use crate::policy::EffectivePolicy;
use crate::types::{policy_id, CyclicReferenceHandling, EnumComparison};

/// Serializable summary of the switches and rule lists of a policy.
#[derive(Clone, Debug, Serialize)]
pub struct PolicyFacts {
    pub policy_id: String,
    pub use_runtime_type: bool,
    pub include_all_public_properties: bool,
    pub recursive: bool,
    pub allow_infinite_recursion: bool,
    pub cyclic_reference_handling: CyclicReferenceHandling,
    pub enum_comparison: EnumComparison,
    pub selection_rules: Vec<String>,
    pub matching_rules: Vec<String>,
    pub ordering_rules: Vec<String>,
    pub user_steps: Vec<String>,
}

impl PolicyFacts {
    #[must_use]
    pub fn collect(policy: &EffectivePolicy) -> Self {
        Self {
            policy_id: policy_id(policy).to_string(),
            use_runtime_type: policy.uses_runtime_type(),
            include_all_public_properties: policy.includes_all_public_properties(),
            recursive: policy.is_recursive(),
            allow_infinite_recursion: policy.allows_infinite_recursion(),
            cyclic_reference_handling: policy.cyclic_reference_handling(),
            enum_comparison: policy.enum_comparison(),
            selection_rules: policy.selection_rules().iter().map(|r| r.description()).collect(),
            matching_rules: policy.matching_rules().iter().map(|r| r.description()).collect(),
            ordering_rules: policy.ordering_rules().iter().map(|r| r.description()).collect(),
            user_steps: policy.user_steps().iter().map(|s| s.description()).collect(),
        }
    }
}

pub(crate) fn emit_policy(facts: &dyn FactsEmitter, event: &str, policy: &EffectivePolicy) {
    let summary = PolicyFacts::collect(policy);
    match serde_json::to_value(&summary) {
        Ok(Value::Object(mut fields)) => {
            fields.insert("schema_version".into(), json!(SCHEMA_VERSION));
            fields.insert("event".into(), json!(event));
            facts.emit(FACTS_SUBSYSTEM, event, "success", Value::Object(fields));
        }
        other => {
            log::warn!(target: "equivalency", "policy facts did not serialize to an object: {other:?}");
            facts.emit(
                FACTS_SUBSYSTEM,
                event,
                "failure",
                json!({
                    "schema_version": SCHEMA_VERSION,
                    "event": event,
                    "policy_id": summary.policy_id,
                }),
            );
        }
    }
}
