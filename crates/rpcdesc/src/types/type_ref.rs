// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Opaque type identity.

use std::fmt;
use std::sync::Arc;

/// Wrapper name that marks a stream-returning member (`Stream<T>`).
pub const STREAM_TYPE_NAME: &str = "Stream";

/// Name used for tuple types; the unit type is a tuple without arguments.
pub const TUPLE_TYPE_NAME: &str = "()";

/// Structural type identity: a name, generic arguments and nullability.
///
/// Equality and hashing are structural, and `Display` gives a stable
/// rendering (`Stream<String>`, `Map<String, u32>`, `(u8, bool)`, `u32?`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    name: Arc<str>,
    args: Arc<[TypeRef]>,
    nullable: bool,
}

impl TypeRef {
    /// Non-generic type.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            args: Arc::from(Vec::new()),
            nullable: false,
        }
    }

    /// Generic type applied to `args`.
    pub fn generic(name: impl Into<Arc<str>>, args: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
            nullable: false,
        }
    }

    /// `Stream<element>`.
    pub fn stream(element: TypeRef) -> Self {
        Self::generic(STREAM_TYPE_NAME, [element])
    }

    /// Tuple of `elements`; empty for unit.
    pub fn tuple(elements: impl IntoIterator<Item = TypeRef>) -> Self {
        Self::generic(TUPLE_TYPE_NAME, elements)
    }

    /// The unit type `()`.
    pub fn unit() -> Self {
        Self::new(TUPLE_TYPE_NAME)
    }

    /// Same type, accepting an absent value.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    /// True if the outermost type is named `wrapper` and is not nullable.
    pub fn is_wrapper(&self, wrapper: &str) -> bool {
        !self.nullable && &*self.name == wrapper
    }

    /// First argument of a non-nullable `wrapper<T>`.
    pub fn wrapped_element(&self, wrapper: &str) -> Option<&TypeRef> {
        if self.is_wrapper(wrapper) {
            self.args.first()
        } else {
            None
        }
    }

    /// True if this is the default stream wrapper ([`STREAM_TYPE_NAME`]).
    ///
    /// Member classification uses `ResolverConfig::stream_type_name`
    /// instead; use [`is_wrapper`](Self::is_wrapper) with that name, or
    /// `CallableDescriptor::stream_element`, when it may differ.
    pub fn is_stream(&self) -> bool {
        self.is_wrapper(STREAM_TYPE_NAME)
    }

    /// Element type of the default stream wrapper.
    pub fn stream_element(&self) -> Option<&TypeRef> {
        self.wrapped_element(STREAM_TYPE_NAME)
    }

    fn write_args(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if &*self.name == TUPLE_TYPE_NAME {
            f.write_str("(")?;
            self.write_args(f)?;
            f.write_str(")")?;
        } else {
            f.write_str(&self.name)?;
            if !self.args.is_empty() {
                f.write_str("<")?;
                self.write_args(f)?;
                f.write_str(">")?;
            }
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
