// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rpcdesc - Protocol-agnostic RPC descriptors
//!
//! Resolves, for every member of a remotely-callable service, a type
//! descriptor carrying what a transport needs to encode arguments and
//! results, without tying the service model to one serialization library.
//!
//! ## Quick Start
//!
//! ```rust
//! use rpcdesc::{MemberSignature, ProviderRegistry, ServiceDescriptor, TypeRef};
//!
//! let registry = ProviderRegistry::new();
//!
//! let news = ServiceDescriptor::builder("news::NewsService")
//!     .member(MemberSignature::non_suspending(
//!         "stream",
//!         TypeRef::stream(TypeRef::new("String")),
//!     ))
//!     .member(
//!         MemberSignature::suspending("greet", TypeRef::new("String"))
//!             .param("name", TypeRef::new("String")),
//!     )
//!     .build(&registry)
//!     .unwrap();
//!
//! let stream = news.callable("stream").unwrap();
//! assert!(stream.returns_stream());
//! assert_eq!(stream.return_type().to_string(), "Stream<String>");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |   ServiceDescriptor  ->  CallableDescriptor (flags, params)   |
//! +---------------------------------------------------------------+
//! |   ProviderRegistry: [provider, provider, ...] + default       |
//! |   (first match wins, default always answers)                  |
//! +---------------------------------------------------------------+
//! |   TypeDescriptor: TypeRef + annotations + protocol payload    |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ProviderRegistry`] | Ordered providers plus a mandatory fallback |
//! | [`TypeDescriptorProvider`] | Protocol hook that builds descriptors |
//! | [`TypeDescriptor`] | Immutable type description handed to transports |
//! | [`ServiceDescriptor`] | Callables of one service, keyed by name |
//! | [`ServiceDirectory`] | Process-wide cache of built service descriptors |

pub mod compat;
pub mod config;
pub mod descriptor;
mod error;
pub mod provider;
pub mod registry;
pub mod service;
pub mod types;

pub use config::{ResolverConfig, SharedConfig};
pub use descriptor::{
    DefaultTypeDescriptor, SerializedTypeDescriptor, Serializer, SerializerId, SerializerTable,
    TypeDescriptor, TypeDescriptorRef,
};
pub use error::{DescriptorError, DescriptorResult};
pub use provider::{DefaultTypeProvider, ProviderRef, TypeDescriptorProvider};
pub use registry::ProviderRegistry;
pub use service::{
    service_descriptor_of, CallableDescriptor, DescribedService, Invocation, MemberSignature,
    ParameterDescriptor, ParameterSignature, ServiceDescriptor, ServiceDescriptorBuilder,
    ServiceDirectory, TypeSite,
};
pub use types::{Annotation, AnnotationKind, Metadata, MetadataValue, TypeRef};
