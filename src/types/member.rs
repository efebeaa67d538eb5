//! Member metadata supplied by the reflection layer.
//!
//! The policy never inspects values when selecting, matching or ordering
//! members; every rule decides on the metadata in [`MemberInfo`] alone.
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::constants::ROOT_LABEL;

/// Runtime identity of a type plus the supertypes the reflection layer declared for it.
///
/// Rust has no inheritance, so "is `T` or a subtype of `T`" is answered against the
/// explicit supertype list attached with [`TypeTag::with_supertype`].
#[derive(Clone, Debug)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
    supertypes: Vec<(TypeId, &'static str)>,
}

impl TypeTag {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            supertypes: Vec::new(),
        }
    }

    /// Declare that values of this type may stand in for `U` (trait object, wrapper, base shape).
    #[must_use]
    pub fn with_supertype<U: ?Sized + 'static>(mut self) -> Self {
        let id = TypeId::of::<U>();
        if id != self.id && !self.supertypes.iter().any(|(s, _)| *s == id) {
            self.supertypes.push((id, std::any::type_name::<U>()));
        }
        self
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn supertypes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.supertypes.iter().map(|(_, name)| *name)
    }

    /// True when this type is exactly `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// True when this type is `other` or declares `other` as a supertype.
    #[must_use]
    pub fn is_assignable_to(&self, other: &TypeTag) -> bool {
        self.is_assignable_to_id(other.id)
    }

    pub(crate) fn is_assignable_to_id(&self, id: TypeId) -> bool {
        self.id == id || self.supertypes.iter().any(|(s, _)| *s == id)
    }

    /// Byte sequences are compared order-sensitively by default.
    #[must_use]
    pub fn is_byte_sequence(&self) -> bool {
        self.is::<Vec<u8>>()
            || self.is::<[u8]>()
            || self.is::<Box<[u8]>>()
            || self.is::<&'static [u8]>()
            || (self.name.starts_with("[u8; ") && self.name.ends_with(']'))
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Access path from the comparison root, e.g. `Order.Lines.Sku`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MemberPath {
    segments: Vec<String>,
}

impl MemberPath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-separated path. Empty segments are dropped.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of member hops from the root; the root itself has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(ROOT_LABEL);
        }
        f.write_str(&self.segments.join("."))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Field,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

/// A named, typed slot taking part in structural comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub declaring_type: TypeTag,
    pub runtime_type: TypeTag,
    pub path: MemberPath,
}

impl MemberInfo {
    /// Public property `name` declared on `declaring_type`, located under `parent`.
    #[must_use]
    pub fn property(
        parent: &MemberPath,
        name: impl Into<String>,
        declaring_type: TypeTag,
        runtime_type: TypeTag,
    ) -> Self {
        let name = name.into();
        Self {
            path: parent.child(name.clone()),
            name,
            kind: MemberKind::Property,
            visibility: Visibility::Public,
            declaring_type,
            runtime_type,
        }
    }

    /// Public field `name` declared on `declaring_type`, located under `parent`.
    #[must_use]
    pub fn field(
        parent: &MemberPath,
        name: impl Into<String>,
        declaring_type: TypeTag,
        runtime_type: TypeTag,
    ) -> Self {
        let mut m = Self::property(parent, name, declaring_type, runtime_type);
        m.kind = MemberKind::Field;
        m
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn is_public_property(&self) -> bool {
        self.kind == MemberKind::Property && self.visibility == Visibility::Public
    }
}
