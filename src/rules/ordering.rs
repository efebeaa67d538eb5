use super::{MemberPredicate, OrderingRule};
use crate::types::{MemberInfo, OrderStrictness};

/// Seeded by default: byte sequences are compared order-sensitively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteSequenceOrderingRule;

impl OrderingRule for ByteSequenceOrderingRule {
    fn strictness(&self, member: &MemberInfo) -> Option<OrderStrictness> {
        member
            .runtime_type
            .is_byte_sequence()
            .then_some(OrderStrictness::Strict)
    }

    fn description(&self) -> String {
        "Be strict about the order of items in byte sequences".to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchAllOrderingRule;

impl OrderingRule for MatchAllOrderingRule {
    fn strictness(&self, _member: &MemberInfo) -> Option<OrderStrictness> {
        Some(OrderStrictness::Strict)
    }

    fn description(&self) -> String {
        "Be strict about the order of all collections".to_string()
    }
}

/// Applies `strictness` to members matching the predicate.
#[derive(Clone, Debug)]
pub struct PredicateOrderingRule {
    predicate: MemberPredicate,
    strictness: OrderStrictness,
}

impl PredicateOrderingRule {
    #[must_use]
    pub fn strict(predicate: MemberPredicate) -> Self {
        Self { predicate, strictness: OrderStrictness::Strict }
    }

    #[must_use]
    pub fn not_strict(predicate: MemberPredicate) -> Self {
        Self { predicate, strictness: OrderStrictness::NotStrict }
    }
}

impl OrderingRule for PredicateOrderingRule {
    fn strictness(&self, member: &MemberInfo) -> Option<OrderStrictness> {
        self.predicate.matches(member).then_some(self.strictness)
    }

    fn description(&self) -> String {
        match self.strictness {
            OrderStrictness::Strict => {
                format!("Be strict about the order of collections when {}", self.predicate)
            }
            OrderStrictness::NotStrict => {
                format!("Ignore the order of collections when {}", self.predicate)
            }
        }
    }
}
