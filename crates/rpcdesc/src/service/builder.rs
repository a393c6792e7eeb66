// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service descriptor and its builder.

use super::callable::CallableDescriptor;
use super::signature::MemberSignature;
use crate::error::{DescriptorError, DescriptorResult};
use crate::registry::ProviderRegistry;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Callables of one service, keyed by simple member name.
///
/// Built once; cloning shares the callable table.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    fq_name: Arc<str>,
    callables: Arc<BTreeMap<Arc<str>, CallableDescriptor>>,
}

impl ServiceDescriptor {
    pub fn builder(fq_name: impl Into<Arc<str>>) -> ServiceDescriptorBuilder {
        ServiceDescriptorBuilder::new(fq_name)
    }

    /// Fully-qualified service name (`news::NewsService`).
    pub fn fq_name(&self) -> &str {
        &self.fq_name
    }

    /// Last path segment of the service name (`NewsService`).
    pub fn simple_name(&self) -> &str {
        let name: &str = &self.fq_name;
        name.rsplit(|c: char| c == ':' || c == '.')
            .next()
            .unwrap_or(name)
    }

    pub fn callables(&self) -> &BTreeMap<Arc<str>, CallableDescriptor> {
        &self.callables
    }

    pub fn callable(&self, name: &str) -> Option<&CallableDescriptor> {
        self.callables.get(name)
    }

    pub fn len(&self) -> usize {
        self.callables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }
}

/// Builder for [`ServiceDescriptor`].
#[derive(Debug, Clone)]
pub struct ServiceDescriptorBuilder {
    fq_name: Arc<str>,
    members: Vec<MemberSignature>,
}

impl ServiceDescriptorBuilder {
    pub fn new(fq_name: impl Into<Arc<str>>) -> Self {
        Self {
            fq_name: fq_name.into(),
            members: Vec::new(),
        }
    }

    /// Add a member.
    #[must_use]
    pub fn member(mut self, signature: MemberSignature) -> Self {
        self.members.push(signature);
        self
    }

    /// Add several members, keeping their order.
    #[must_use]
    pub fn members(mut self, signatures: impl IntoIterator<Item = MemberSignature>) -> Self {
        self.members.extend(signatures);
        self
    }

    /// Resolve every member through `registry`.
    ///
    /// Fails on an empty service or member name and on two members sharing
    /// a name; overloads must be rejected before they reach this point.
    pub fn build(self, registry: &ProviderRegistry) -> DescriptorResult<ServiceDescriptor> {
        if self.fq_name.trim().is_empty() {
            return Err(DescriptorError::EmptyServiceName);
        }

        let mut callables = BTreeMap::new();
        for signature in &self.members {
            if signature.name.is_empty() {
                return Err(DescriptorError::EmptyCallableName {
                    service: self.fq_name.to_string(),
                });
            }
            match callables.entry(Arc::clone(&signature.name)) {
                Entry::Occupied(_) => {
                    return Err(DescriptorError::DuplicateCallable {
                        service: self.fq_name.to_string(),
                        callable: signature.name.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(CallableDescriptor::resolve(signature, registry));
                }
            }
        }

        log::debug!(
            "[services] built '{}' with {} callable(s)",
            self.fq_name,
            callables.len()
        );

        Ok(ServiceDescriptor {
            fq_name: self.fq_name,
            callables: Arc::new(callables),
        })
    }
}
