// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Provider registry: ordered providers plus a mandatory fallback.
//!
//! # Resolution
//!
//! Providers are scanned in registration order; the first whose
//! `can_handle` accepts the type builds the descriptor. When none does, the
//! default provider builds it. The default always accepts, so
//! [`ProviderRegistry::resolve`] never fails. Register specific providers
//! before general ones.
//!
//! # Concurrency
//!
//! The provider list lives in an immutable snapshot behind `ArcSwap`.
//! `register` and `set_default` publish a new snapshot; `resolve` loads the
//! current one without locking, so a late registration never races an
//! in-flight scan. Registration is still expected to finish during startup:
//! a resolve running concurrently with `register` may or may not see the new
//! provider.
//!
//! # Duplicates
//!
//! Registering the same provider instance (`Arc::ptr_eq`) twice is a no-op.
//! Distinct instances of the same provider type are kept as separate entries.

use crate::config::{ResolverConfig, SharedConfig};
use crate::descriptor::TypeDescriptorRef;
use crate::provider::{DefaultTypeProvider, ProviderRef};
use crate::service::TypeSite;
use crate::types::{Annotation, Metadata, TypeRef};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL_REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

/// Process-wide registry for code that does not thread one through.
///
/// Protocol crates register into it at startup. Prefer passing an explicit
/// [`ProviderRegistry`] where the call site allows it.
pub fn global() -> &'static ProviderRegistry {
    GLOBAL_REGISTRY.get_or_init(ProviderRegistry::new)
}

/// One published state of the registry.
#[derive(Clone)]
struct ProviderSet {
    providers: Vec<ProviderRef>,
    default: ProviderRef,
}

impl ProviderSet {
    fn initial() -> Self {
        Self {
            providers: Vec::new(),
            default: Arc::new(DefaultTypeProvider),
        }
    }
}

/// Ordered collection of type descriptor providers.
pub struct ProviderRegistry {
    set: ArcSwap<ProviderSet>,
    config: SharedConfig,
}

impl ProviderRegistry {
    /// Empty registry with the built-in default provider.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ResolverConfig) -> Self {
        Self {
            set: ArcSwap::from_pointee(ProviderSet::initial()),
            config: SharedConfig::new(config),
        }
    }

    /// Append a provider. Returns `false` if this exact instance is already
    /// registered.
    pub fn register(&self, provider: ProviderRef) -> bool {
        let mut added = false;
        self.set.rcu(|current| {
            if current.providers.iter().any(|p| Arc::ptr_eq(p, &provider)) {
                added = false;
                return Arc::clone(current);
            }
            let mut next = ProviderSet::clone(current);
            next.providers.push(Arc::clone(&provider));
            added = true;
            Arc::new(next)
        });

        if added {
            log::debug!("[providers] registered '{}'", provider.name());
        } else {
            log::debug!(
                "[providers] '{}' already registered, ignoring",
                provider.name()
            );
        }
        added
    }

    /// Replace the fallback provider. The ordered list is untouched.
    ///
    /// The replacement is used for every type no registered provider
    /// accepts, so it must accept every type itself.
    pub fn set_default(&self, provider: ProviderRef) {
        log::debug!("[providers] default provider is now '{}'", provider.name());
        self.set.rcu(|current| {
            let mut next = ProviderSet::clone(current);
            next.default = Arc::clone(&provider);
            next
        });
    }

    /// Provider that would serve `ty` with `annotations`.
    pub fn select(&self, ty: &TypeRef, annotations: &[Annotation]) -> ProviderRef {
        let set = self.set.load();
        let provider = set
            .providers
            .iter()
            .find(|p| p.can_handle(ty, annotations))
            .unwrap_or(&set.default);
        Arc::clone(provider)
    }

    /// Resolve a descriptor for `ty`. Never fails.
    pub fn resolve(
        &self,
        ty: &TypeRef,
        annotations: &[Annotation],
        metadata: &Metadata,
    ) -> TypeDescriptorRef {
        let provider = self.select(ty, annotations);
        log::trace!("[providers] {} -> '{}'", ty, provider.name());
        provider.create(ty, annotations, metadata)
    }

    /// Resolve a generator-emitted type site.
    pub fn resolve_site(&self, site: &TypeSite) -> TypeDescriptorRef {
        self.resolve(&site.ty, &site.annotations, &site.metadata)
    }

    /// Number of registered providers (the default is not counted).
    pub fn len(&self) -> usize {
        self.set.load().providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of registered providers, in priority order.
    pub fn provider_names(&self) -> Vec<String> {
        self.set
            .load()
            .providers
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn default_provider(&self) -> ProviderRef {
        Arc::clone(&self.set.load().default)
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<ResolverConfig> {
        self.config.load()
    }

    /// Replace the configuration. Providers holding
    /// [`shared_config`](Self::shared_config) see the change on their next
    /// resolution.
    pub fn set_config(&self, config: ResolverConfig) {
        log::debug!("[providers] config replaced");
        self.config.store(config);
    }

    /// Handle on this registry's configuration cell, for providers.
    pub fn shared_config(&self) -> SharedConfig {
        self.config.clone()
    }

    /// Drop every registered provider and restore the built-in default.
    ///
    /// Test isolation only. Calling this while another thread resolves is
    /// outside the registry's contract: that resolve may observe either
    /// state, and providers registered by other components are lost.
    pub fn clear(&self) {
        log::debug!("[providers] cleared");
        self.set.store(Arc::new(ProviderSet::initial()));
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.set.load();
        f.debug_struct("ProviderRegistry")
            .field(
                "providers",
                &set.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("default", &set.default.name())
            .field("config", &self.config)
            .finish()
    }
}
