// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Directory of built service descriptors.
//!
//! One index keyed by fully-qualified service name. `descriptor_of::<S>()`
//! looks `S::SERVICE_NAME` up in it and builds the descriptor on a miss, so
//! `publish` and `withdraw` are seen by both lookups.

use super::builder::ServiceDescriptor;
use super::signature::MemberSignature;
use crate::error::{DescriptorError, DescriptorResult};
use crate::registry::{self, ProviderRegistry};
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};

/// Implemented (usually by generated code) for every service interface.
pub trait DescribedService: 'static {
    /// Fully-qualified service name. `describe` must produce a descriptor
    /// with this name.
    const SERVICE_NAME: &'static str;

    /// Members in declaration order.
    fn members() -> Vec<MemberSignature>;

    fn describe(registry: &ProviderRegistry) -> DescriptorResult<ServiceDescriptor> {
        ServiceDescriptor::builder(Self::SERVICE_NAME)
            .members(Self::members())
            .build(registry)
    }
}

static GLOBAL_DIRECTORY: OnceLock<ServiceDirectory> = OnceLock::new();

/// Process-wide directory used by [`service_descriptor_of`].
pub fn global_directory() -> &'static ServiceDirectory {
    GLOBAL_DIRECTORY.get_or_init(ServiceDirectory::new)
}

/// Descriptor of `S`, built through the global registry on first use.
///
/// Protocol providers must be registered in [`registry::global`] before the
/// first call for a given service; later registrations do not rebuild it.
pub fn service_descriptor_of<S: DescribedService>() -> DescriptorResult<Arc<ServiceDescriptor>> {
    global_directory().descriptor_of::<S>(registry::global())
}

/// Thread-safe cache of service descriptors.
#[derive(Debug, Default)]
pub struct ServiceDirectory {
    by_name: DashMap<Arc<str>, Arc<ServiceDescriptor>>,
}

impl ServiceDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor published under `S::SERVICE_NAME`, building and
    /// publishing it if missing.
    ///
    /// A descriptor published by hand under that name is returned as is.
    pub fn descriptor_of<S: DescribedService>(
        &self,
        registry: &ProviderRegistry,
    ) -> DescriptorResult<Arc<ServiceDescriptor>> {
        if let Some(hit) = self.lookup(S::SERVICE_NAME) {
            return Ok(hit);
        }

        let built = S::describe(registry)?;
        if built.fq_name() != S::SERVICE_NAME {
            return Err(DescriptorError::ServiceNameMismatch {
                declared: S::SERVICE_NAME.to_string(),
                built: built.fq_name().to_string(),
            });
        }

        // Another thread may have raced us; keep whichever landed first.
        let descriptor = Arc::clone(
            self.by_name
                .entry(Arc::from(S::SERVICE_NAME))
                .or_insert_with(|| Arc::new(built))
                .value(),
        );
        Ok(descriptor)
    }

    /// Make `descriptor` reachable by name, replacing any previous entry.
    pub fn publish(&self, descriptor: ServiceDescriptor) -> Arc<ServiceDescriptor> {
        let descriptor = Arc::new(descriptor);
        if self
            .by_name
            .insert(Arc::from(descriptor.fq_name()), Arc::clone(&descriptor))
            .is_some()
        {
            log::debug!("[services] replaced '{}'", descriptor.fq_name());
        } else {
            log::debug!("[services] published '{}'", descriptor.fq_name());
        }
        descriptor
    }

    /// Look a service up by fully-qualified name.
    pub fn lookup(&self, fq_name: &str) -> Option<Arc<ServiceDescriptor>> {
        self.by_name.get(fq_name).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove a service. The next `descriptor_of` for it rebuilds.
    pub fn withdraw(&self, fq_name: &str) -> Option<Arc<ServiceDescriptor>> {
        let removed = self.by_name.remove(fq_name).map(|(_, d)| d);
        if removed.is_some() {
            log::debug!("[services] withdrew '{}'", fq_name);
        }
        removed
    }

    /// Names of reachable services, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .by_name
            .iter()
            .map(|entry| entry.key().to_string())
            .collect();
        names.sort();
        names
    }

    /// Forget everything. Test isolation only.
    pub fn clear(&self) {
        self.by_name.clear();
    }
}
