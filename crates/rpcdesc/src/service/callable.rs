// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Callable (service member) descriptors.

use super::signature::{Invocation, MemberSignature};
use crate::descriptor::TypeDescriptorRef;
use crate::registry::ProviderRegistry;
use crate::types::TypeRef;
use std::sync::Arc;

/// Resolved parameter of a callable.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    name: Arc<str>,
    ty: TypeDescriptorRef,
    is_optional: bool,
}

impl ParameterDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptorRef {
        &self.ty
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }
}

/// One invocable member of a service.
///
/// `returns_stream` and `is_non_suspending_invocation` are independent:
/// the first comes from the declared return type, the second from how the
/// member is invoked.
#[derive(Debug, Clone)]
pub struct CallableDescriptor {
    name: Arc<str>,
    parameters: Vec<ParameterDescriptor>,
    return_type: TypeDescriptorRef,
    returns_stream: bool,
    stream_element: Option<TypeRef>,
    is_non_suspending: bool,
}

impl CallableDescriptor {
    /// Resolve every type of `signature` through `registry`.
    ///
    /// For a streaming member the return descriptor describes the wrapper
    /// (`Stream<T>`), not the element.
    pub fn resolve(signature: &MemberSignature, registry: &ProviderRegistry) -> Self {
        let config = registry.config();
        let parameters = signature
            .parameters
            .iter()
            .map(|p| ParameterDescriptor {
                name: Arc::clone(&p.name),
                ty: registry.resolve_site(&p.site),
                is_optional: p.is_optional,
            })
            .collect();

        Self {
            name: Arc::clone(&signature.name),
            parameters,
            return_type: registry.resolve_site(&signature.returns),
            returns_stream: signature.returns.ty.is_wrapper(&config.stream_type_name),
            stream_element: signature
                .returns
                .ty
                .wrapped_element(&config.stream_type_name)
                .cloned(),
            is_non_suspending: signature.invocation == Invocation::NonSuspending,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Parameter descriptors in declaration order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &TypeDescriptorRef> {
        self.parameters.iter().map(|p| &p.ty)
    }

    pub fn return_type(&self) -> &TypeDescriptorRef {
        &self.return_type
    }

    pub fn returns_stream(&self) -> bool {
        self.returns_stream
    }

    /// Element type of a streaming member, under the stream wrapper name
    /// in effect when the callable was resolved.
    pub fn stream_element(&self) -> Option<&TypeRef> {
        self.stream_element.as_ref()
    }

    /// True if the caller receives the result (or stream handle) without
    /// awaiting the call itself.
    pub fn is_non_suspending_invocation(&self) -> bool {
        self.is_non_suspending
    }
}
