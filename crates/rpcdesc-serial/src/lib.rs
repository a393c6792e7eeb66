// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rpcdesc-serial - Serializer-aware descriptors
//!
//! Provider for protocols that let a type opt into custom serialization.
//! A type annotated with the opt-in marker resolves to a
//! [`SerializedTypeDescriptor`](rpcdesc::SerializedTypeDescriptor) whose
//! table comes from the site's `serializers` metadata entry.
//!
//! ```rust
//! use rpcdesc::{Annotation, Metadata, ProviderRegistry, SerializerTable, TypeDescriptor, TypeRef};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Iso8601;
//!
//! let registry = ProviderRegistry::new();
//! rpcdesc_serial::register_serializer_provider(&registry);
//!
//! let table = SerializerTable::new().with("Instant", Arc::new(Iso8601));
//! let descriptor = registry.resolve(
//!     &TypeRef::new("Event"),
//!     &[Annotation::serializable()],
//!     &Metadata::new().with("serializers", table.clone()),
//! );
//! assert_eq!(descriptor.serializers(), Some(&table));
//! ```

mod provider;

pub use provider::{register_serializer_provider, SerializerTypeProvider};
