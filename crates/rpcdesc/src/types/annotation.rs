// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declaration-site attributes attached to a type.

use std::fmt;
use std::sync::Arc;

/// Path the code generator gives the serialization opt-in attribute.
pub const SERIALIZABLE_MARKER_PATH: &str = "rpcdesc::Serializable";

/// Capability tag set by the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Attribute with no meaning to the resolver.
    Plain,
    /// The type opts into protocol-driven serialization.
    SerializationOptIn,
}

/// One attribute value, e.g. `@rpcdesc::Serializable(with = "UuidSerializer")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    path: Arc<str>,
    kind: AnnotationKind,
    arguments: Vec<(Arc<str>, Arc<str>)>,
}

impl Annotation {
    /// Plain attribute.
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            kind: AnnotationKind::Plain,
            arguments: Vec::new(),
        }
    }

    /// Serialization opt-in marker at the canonical path.
    pub fn serializable() -> Self {
        Self::new(SERIALIZABLE_MARKER_PATH).with_kind(AnnotationKind::SerializationOptIn)
    }

    #[must_use]
    pub fn with_kind(mut self, kind: AnnotationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a `name = value` argument. Order is preserved.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    pub fn arguments(&self) -> &[(Arc<str>, Arc<str>)] {
        &self.arguments
    }

    /// Value of the first argument called `name`.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|(_, value)| &**value)
    }

    pub fn is_serialization_opt_in(&self) -> bool {
        self.kind == AnnotationKind::SerializationOptIn
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.path)?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (idx, (name, value)) in self.arguments.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        f.write_str(")")
    }
}
