// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Opt-in serializer provider.

use rpcdesc::compat;
use rpcdesc::{
    Annotation, Metadata, MetadataValue, ProviderRef, ProviderRegistry, ResolverConfig,
    SerializedTypeDescriptor, SerializerTable, SharedConfig, TypeDescriptorProvider,
    TypeDescriptorRef, TypeRef,
};
use std::sync::Arc;

/// Serves types carrying the serialization opt-in annotation.
///
/// Detection uses the structural tag first. When
/// `textual_annotation_fallback` is on, an untagged annotation whose path
/// names the marker also counts. Settings are read from the configuration
/// cell on every call, so a provider registered through
/// [`register_serializer_provider`] follows `ProviderRegistry::set_config`.
#[derive(Debug, Clone)]
pub struct SerializerTypeProvider {
    config: SharedConfig,
}

impl SerializerTypeProvider {
    /// Provider with default settings.
    pub fn new() -> Self {
        Self::with_shared_config(SharedConfig::default())
    }

    /// Provider with fixed settings, not tied to any registry.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_shared_config(SharedConfig::new(config.clone()))
    }

    /// Provider reading `config` at resolution time.
    pub fn with_shared_config(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Metadata key the table is currently read from.
    pub fn serializers_key(&self) -> String {
        self.config.load().serializers_key.clone()
    }

    fn opts_in(config: &ResolverConfig, annotation: &Annotation) -> bool {
        annotation.is_serialization_opt_in()
            || (config.textual_annotation_fallback
                && compat::names_serialization_opt_in(annotation))
    }

    /// Table under the serializers key. Anything but a table reads as empty.
    fn table(config: &ResolverConfig, ty: &TypeRef, metadata: &Metadata) -> SerializerTable {
        match metadata.get(&config.serializers_key) {
            Some(MetadataValue::Serializers(table)) => table.clone(),
            Some(other) => {
                if config.warn_on_malformed_metadata {
                    log::warn!(
                        "[serial] {}: '{}' holds {} instead of serializers, using none",
                        ty,
                        config.serializers_key,
                        other.shape()
                    );
                }
                SerializerTable::new()
            }
            None => SerializerTable::new(),
        }
    }
}

impl Default for SerializerTypeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeDescriptorProvider for SerializerTypeProvider {
    fn name(&self) -> &str {
        "serial"
    }

    fn can_handle(&self, _ty: &TypeRef, annotations: &[Annotation]) -> bool {
        let config = self.config.load();
        annotations.iter().any(|a| Self::opts_in(&config, a))
    }

    fn create(
        &self,
        ty: &TypeRef,
        annotations: &[Annotation],
        metadata: &Metadata,
    ) -> TypeDescriptorRef {
        let config = self.config.load();
        Arc::new(SerializedTypeDescriptor::new(
            ty.clone(),
            annotations.to_vec(),
            Self::table(&config, ty, metadata),
        ))
    }
}

/// Register a [`SerializerTypeProvider`] sharing `registry`'s configuration.
///
/// Call once at startup, before any service descriptor is built. Returns
/// the registered instance.
pub fn register_serializer_provider(registry: &ProviderRegistry) -> ProviderRef {
    let provider: ProviderRef = Arc::new(SerializerTypeProvider::with_shared_config(
        registry.shared_config(),
    ));
    registry.register(Arc::clone(&provider));
    log::info!("[serial] serializer provider enabled");
    provider
}
