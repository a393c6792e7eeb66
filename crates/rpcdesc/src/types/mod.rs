// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Plain-data inputs to type resolution.
//!
//! Provides `TypeRef` for type identity, `Annotation` for declaration-site
//! attributes, and `Metadata` for protocol-specific side data. All of them
//! are produced ahead of time by the code generator; nothing here reflects
//! on live Rust types.

pub mod annotation;
pub mod metadata;
pub mod type_ref;

pub use annotation::{Annotation, AnnotationKind, SERIALIZABLE_MARKER_PATH};
pub use metadata::{Metadata, MetadataValue};
pub use type_ref::{TypeRef, STREAM_TYPE_NAME, TUPLE_TYPE_NAME};
