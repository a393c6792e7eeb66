// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptor providers.
//!
//! A provider is the hook a protocol crate uses to contribute its own
//! descriptor shape. The registry asks `can_handle` on every resolution, so
//! it must be cheap and side-effect free; `create` is only called after a
//! positive `can_handle` (or on the registry's default provider).

use crate::descriptor::{DefaultTypeDescriptor, TypeDescriptorRef};
use crate::types::{Annotation, Metadata, TypeRef};
use std::sync::Arc;

/// Builds type descriptors for the types it recognizes.
pub trait TypeDescriptorProvider: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether this provider should serve `ty`. Pure and cheap.
    fn can_handle(&self, ty: &TypeRef, annotations: &[Annotation]) -> bool;

    /// Build the descriptor. Must not fail for inputs accepted by
    /// `can_handle`; behavior for other inputs is up to the provider.
    fn create(
        &self,
        ty: &TypeRef,
        annotations: &[Annotation],
        metadata: &Metadata,
    ) -> TypeDescriptorRef;
}

/// Shared handle to a provider.
pub type ProviderRef = Arc<dyn TypeDescriptorProvider>;

/// Fallback provider: accepts every type and ignores metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTypeProvider;

impl TypeDescriptorProvider for DefaultTypeProvider {
    fn name(&self) -> &str {
        "default"
    }

    fn can_handle(&self, _ty: &TypeRef, _annotations: &[Annotation]) -> bool {
        true
    }

    fn create(
        &self,
        ty: &TypeRef,
        annotations: &[Annotation],
        _metadata: &Metadata,
    ) -> TypeDescriptorRef {
        Arc::new(DefaultTypeDescriptor::new(ty.clone(), annotations.to_vec()))
    }
}
