// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors handed to transports.
//!
//! A descriptor is built once by a provider and then shared read-only via
//! [`TypeDescriptorRef`]. Two shapes ship with the core:
//!
//! - [`DefaultTypeDescriptor`]: type identity and annotations only
//! - [`SerializedTypeDescriptor`]: the same plus a [`SerializerTable`]
//!
//! Protocol crates may define their own shapes by implementing
//! [`TypeDescriptor`]; transports recover them with
//! [`downcast_ref`](trait.TypeDescriptor.html#method.downcast_ref).

use crate::types::{Annotation, TypeRef};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Immutable description of one type as seen by the transport layer.
///
/// `Display` renders the underlying type.
pub trait TypeDescriptor: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Semantic identity of the described type.
    fn underlying_type(&self) -> &TypeRef;

    /// Declaration-site attributes, in declaration order.
    fn annotations(&self) -> &[Annotation];

    /// Custom serializers, for descriptors that carry them.
    fn serializers(&self) -> Option<&SerializerTable> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

impl dyn TypeDescriptor {
    /// Recover the concrete descriptor shape.
    pub fn downcast_ref<T: TypeDescriptor>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Shared handle to a resolved descriptor.
pub type TypeDescriptorRef = Arc<dyn TypeDescriptor>;

/// Minimal descriptor built by the fallback provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTypeDescriptor {
    ty: TypeRef,
    annotations: Vec<Annotation>,
}

impl DefaultTypeDescriptor {
    pub fn new(ty: TypeRef, annotations: Vec<Annotation>) -> Self {
        Self { ty, annotations }
    }
}

impl TypeDescriptor for DefaultTypeDescriptor {
    fn underlying_type(&self) -> &TypeRef {
        &self.ty
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for DefaultTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.ty, f)
    }
}

/// Descriptor carrying the serializers a protocol should use for the type.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedTypeDescriptor {
    ty: TypeRef,
    annotations: Vec<Annotation>,
    serializers: SerializerTable,
}

impl SerializedTypeDescriptor {
    pub fn new(ty: TypeRef, annotations: Vec<Annotation>, serializers: SerializerTable) -> Self {
        Self {
            ty,
            annotations,
            serializers,
        }
    }

    pub fn table(&self) -> &SerializerTable {
        &self.serializers
    }
}

impl TypeDescriptor for SerializedTypeDescriptor {
    fn underlying_type(&self) -> &TypeRef {
        &self.ty
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn serializers(&self) -> Option<&SerializerTable> {
        Some(&self.serializers)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for SerializedTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.ty, f)
    }
}

// ---------------------------------------------------------------------------
// Serializer table
// ---------------------------------------------------------------------------

/// Opaque serializer instance owned by a serialization library.
///
/// The core never calls into it; transports downcast to the concrete type.
pub trait Serializer: Any + fmt::Debug + Send + Sync {
    fn instance(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> Serializer for T {
    fn instance(&self) -> &dyn Any {
        self
    }
}

impl dyn Serializer {
    /// Recover the concrete serializer.
    pub fn downcast_ref<T: Serializer>(&self) -> Option<&T> {
        self.instance().downcast_ref::<T>()
    }
}

/// Identity of a serializer (usually the generated serializer's path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SerializerId(Arc<str>);

impl SerializerId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SerializerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SerializerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Serializer identity -> instance. Keys are unique.
///
/// Two tables are equal when they hold the same keys mapped to the same
/// instances (pointer identity).
#[derive(Debug, Clone, Default)]
pub struct SerializerTable {
    entries: BTreeMap<SerializerId, Arc<dyn Serializer>>,
}

impl SerializerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, id: impl Into<SerializerId>, serializer: Arc<dyn Serializer>) -> Self {
        self.insert(id, serializer);
        self
    }

    /// Insert, returning the instance previously stored under `id`.
    pub fn insert(
        &mut self,
        id: impl Into<SerializerId>,
        serializer: Arc<dyn Serializer>,
    ) -> Option<Arc<dyn Serializer>> {
        self.entries.insert(id.into(), serializer)
    }

    pub fn get(&self, id: &SerializerId) -> Option<&Arc<dyn Serializer>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &SerializerId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SerializerId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SerializerId, &Arc<dyn Serializer>)> {
        self.entries.iter()
    }
}

impl PartialEq for SerializerTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && Arc::ptr_eq(va, vb))
    }
}
