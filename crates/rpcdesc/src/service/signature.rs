// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator-emitted member signatures.

use crate::types::{Annotation, Metadata, MetadataValue, TypeRef};
use std::sync::Arc;

/// A type as it appears at one declaration site.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSite {
    pub ty: TypeRef,
    pub annotations: Vec<Annotation>,
    pub metadata: Metadata,
}

impl TypeSite {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            annotations: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<Arc<str>>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

impl From<TypeRef> for TypeSite {
    fn from(ty: TypeRef) -> Self {
        Self::new(ty)
    }
}

/// How a caller invokes the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invocation {
    /// The caller awaits the result (`async fn`).
    Suspending,
    /// The caller gets the result or handle immediately (e.g. a stream).
    NonSuspending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSignature {
    pub name: Arc<str>,
    pub site: TypeSite,
    pub is_optional: bool,
}

/// One member of a service interface as seen by the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSignature {
    pub name: Arc<str>,
    pub parameters: Vec<ParameterSignature>,
    pub returns: TypeSite,
    pub invocation: Invocation,
}

impl MemberSignature {
    pub fn new(name: impl Into<Arc<str>>, returns: impl Into<TypeSite>, invocation: Invocation) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            returns: returns.into(),
            invocation,
        }
    }

    /// `async fn name(..) -> returns`
    pub fn suspending(name: impl Into<Arc<str>>, returns: impl Into<TypeSite>) -> Self {
        Self::new(name, returns, Invocation::Suspending)
    }

    /// `fn name(..) -> returns`
    pub fn non_suspending(name: impl Into<Arc<str>>, returns: impl Into<TypeSite>) -> Self {
        Self::new(name, returns, Invocation::NonSuspending)
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<Arc<str>>, site: impl Into<TypeSite>) -> Self {
        self.parameters.push(ParameterSignature {
            name: name.into(),
            site: site.into(),
            is_optional: false,
        });
        self
    }

    /// Parameter with a default value on the declaring side.
    #[must_use]
    pub fn optional_param(mut self, name: impl Into<Arc<str>>, site: impl Into<TypeSite>) -> Self {
        self.parameters.push(ParameterSignature {
            name: name.into(),
            site: site.into(),
            is_optional: true,
        });
        self
    }
}
