// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver configuration.
//!
//! `ResolverConfig` lives in a [`SharedConfig`] cell owned by a
//! [`ProviderRegistry`](crate::ProviderRegistry). Providers built from the
//! registry hold a clone of the same cell and read it on every resolution,
//! so `ProviderRegistry::set_config` reaches them too. The cell is swapped
//! atomically (`ArcSwap`); readers never take a lock.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "config-loaders")] {
//! use rpcdesc::ResolverConfig;
//!
//! let config = ResolverConfig::from_json_str(r#"{ "textual_annotation_fallback": false }"#)
//!     .unwrap();
//! assert!(!config.textual_annotation_fallback);
//! assert_eq!(config.serializers_key, "serializers");
//! # }
//! ```

use crate::error::{DescriptorError, DescriptorResult};
use crate::types::STREAM_TYPE_NAME;
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;

/// Metadata key read by serializer-aware providers.
pub const DEFAULT_SERIALIZERS_KEY: &str = "serializers";

/// Tunables shared by the registry and the providers built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config-loaders",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ResolverConfig {
    /// Accept annotations whose path names the opt-in marker even when
    /// the generator did not tag them structurally.
    pub textual_annotation_fallback: bool,
    /// Log a warning when metadata under a known key has the wrong shape.
    pub warn_on_malformed_metadata: bool,
    /// Metadata key holding the serializer table.
    pub serializers_key: String,
    /// Outermost type name marking a stream-returning member.
    pub stream_type_name: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            textual_annotation_fallback: true,
            warn_on_malformed_metadata: true,
            serializers_key: DEFAULT_SERIALIZERS_KEY.to_string(),
            stream_type_name: STREAM_TYPE_NAME.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Check field invariants (non-empty key and wrapper name).
    pub fn validate(&self) -> DescriptorResult<()> {
        if self.serializers_key.trim().is_empty() {
            return Err(DescriptorError::Config(
                "serializers_key must not be empty".to_string(),
            ));
        }
        if self.stream_type_name.trim().is_empty() {
            return Err(DescriptorError::Config(
                "stream_type_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    #[cfg(feature = "config-loaders")]
    pub fn from_json_str(json: &str) -> DescriptorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "config-loaders")]
    pub fn to_json_string(&self) -> DescriptorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration cell shared between a registry and its providers.
///
/// Clones point at the same cell: a `store` through one is seen by all.
#[derive(Clone)]
pub struct SharedConfig(Arc<ArcSwap<ResolverConfig>>);

impl SharedConfig {
    pub fn new(config: ResolverConfig) -> Self {
        Self(Arc::new(ArcSwap::from_pointee(config)))
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<ResolverConfig> {
        self.0.load_full()
    }

    /// Replace the configuration for every holder of this cell.
    pub fn store(&self, config: ResolverConfig) {
        self.0.store(Arc::new(config));
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0.load(), f)
    }
}
