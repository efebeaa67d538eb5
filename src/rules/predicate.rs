//! First-class predicates over member metadata.
//!
//! A predicate carries its own description so that `describe()` can say what a
//! rule does without access to source text.
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::types::MemberInfo;

type PredicateFn = dyn Fn(&MemberInfo) -> bool + Send + Sync;

#[derive(Clone)]
pub struct MemberPredicate {
    description: String,
    test: Arc<PredicateFn>,
}

impl MemberPredicate {
    pub fn new<F>(description: impl Into<String>, test: F) -> Self
    where
        F: Fn(&MemberInfo) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            test: Arc::new(test),
        }
    }

    /// Holds for every member.
    #[must_use]
    pub fn any() -> Self {
        Self::new("true", |_| true)
    }

    #[must_use]
    pub fn name_is(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(format!("member.name == {name:?}"), move |m| m.name == name)
    }

    /// Exact match on the dot-joined path from the root, e.g. `Order.Lines`.
    #[must_use]
    pub fn path_is(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(format!("member.path == {path:?}"), move |m| {
            m.path.to_string() == path
        })
    }

    /// Regex match on the dot-joined path. Anchor the pattern for whole-path matches.
    pub fn path_matches(pattern: &str) -> Result<Self, regex::Error> {
        let re = Regex::new(pattern)?;
        Ok(Self::new(format!("member.path =~ /{pattern}/"), move |m| {
            re.is_match(&m.path.to_string())
        }))
    }

    /// Runtime type is `T` or declares `T` as a supertype.
    #[must_use]
    pub fn runtime_type_is<T: ?Sized + 'static>() -> Self {
        let id = TypeId::of::<T>();
        Self::new(
            format!("member.runtime_type is {}", std::any::type_name::<T>()),
            move |m| m.runtime_type.is_assignable_to_id(id),
        )
    }

    #[must_use]
    pub fn declared_in<T: ?Sized + 'static>() -> Self {
        let id = TypeId::of::<T>();
        Self::new(
            format!("member.declaring_type is {}", std::any::type_name::<T>()),
            move |m| m.declaring_type.is_assignable_to_id(id),
        )
    }

    #[must_use]
    pub fn and(self, other: MemberPredicate) -> Self {
        let description = format!("({}) && ({})", self.description, other.description);
        Self::new(description, move |m| self.matches(m) && other.matches(m))
    }

    #[must_use]
    pub fn or(self, other: MemberPredicate) -> Self {
        let description = format!("({}) || ({})", self.description, other.description);
        Self::new(description, move |m| self.matches(m) || other.matches(m))
    }

    #[must_use]
    pub fn not(self) -> Self {
        let description = format!("!({})", self.description);
        Self::new(description, move |m| !self.matches(m))
    }

    #[must_use]
    pub fn matches(&self, member: &MemberInfo) -> bool {
        (self.test)(member)
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for MemberPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberPredicate")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for MemberPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}
