use std::fmt;
use std::sync::Arc;

/// Ordered sequence of shared rules.
///
/// Precedence is expressed by the insertion operation, never by the caller:
/// `insert_at_head` gives the newest entry the highest precedence,
/// `insert_at_tail` the lowest. Cloning copies the sequence; the rules
/// themselves are immutable and stay shared.
pub struct RuleList<R: ?Sized> {
    rules: Vec<Arc<R>>,
}

impl<R: ?Sized> RuleList<R> {
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn insert_at_head(&mut self, rule: Arc<R>) {
        self.rules.insert(0, rule);
    }

    pub fn insert_at_tail(&mut self, rule: Arc<R>) {
        self.rules.push(rule);
    }

    /// Swap the rule at `index` without changing its precedence. Out of range is a no-op.
    pub fn replace_at(&mut self, index: usize, rule: Arc<R>) {
        if let Some(slot) = self.rules.get_mut(index) {
            *slot = rule;
        }
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn retain(&mut self, keep: impl FnMut(&Arc<R>) -> bool) {
        self.rules.retain(keep);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<R>> {
        self.rules.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Arc<R>] {
        &self.rules
    }
}

impl<R: ?Sized> Default for RuleList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> Clone for RuleList<R> {
    fn clone(&self) -> Self {
        Self { rules: self.rules.clone() }
    }
}

impl<R: ?Sized> fmt::Debug for RuleList<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleList").field("len", &self.rules.len()).finish()
    }
}

impl<'a, R: ?Sized> IntoIterator for &'a RuleList<R> {
    type Item = &'a Arc<R>;
    type IntoIter = std::slice::Iter<'a, Arc<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
