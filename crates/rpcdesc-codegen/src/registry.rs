// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Build-time extension registry.
//!
//! Same selection rule as the runtime provider registry: extensions are
//! asked in registration order and the first whose `can_handle` accepts the
//! type wins. Unlike the runtime registry there is no mandatory fallback;
//! [`CodegenExtensionRegistry::get_extension`] returns the default if one
//! was set, else `None`, and [`emit_type_call`] falls back to
//! [`DefaultTypeCallExtension`].

use crate::context::CodegenContext;
use crate::extension::{DefaultTypeCallExtension, ExtensionRef, TypeCallExtension};
use arc_swap::ArcSwap;
use proc_macro2::TokenStream;
use quote::ToTokens;
use std::fmt;
use std::sync::{Arc, OnceLock};

static GLOBAL_EXTENSIONS: OnceLock<CodegenExtensionRegistry> = OnceLock::new();

/// Process-wide registry, for generators that are plain functions.
pub fn global() -> &'static CodegenExtensionRegistry {
    GLOBAL_EXTENSIONS.get_or_init(CodegenExtensionRegistry::new)
}

#[derive(Clone, Default)]
struct ExtensionSet {
    extensions: Vec<ExtensionRef>,
    default: Option<ExtensionRef>,
}

/// Ordered collection of type-call extensions.
#[derive(Default)]
pub struct CodegenExtensionRegistry {
    set: ArcSwap<ExtensionSet>,
}

impl CodegenExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an extension. Returns `false` if this exact instance is
    /// already registered.
    pub fn register(&self, extension: ExtensionRef) -> bool {
        let mut added = false;
        self.set.rcu(|current| {
            added = !current
                .extensions
                .iter()
                .any(|e| Arc::ptr_eq(e, &extension));
            if !added {
                return Arc::clone(current);
            }
            let mut next = ExtensionSet::clone(current);
            next.extensions.push(Arc::clone(&extension));
            Arc::new(next)
        });

        if added {
            log::debug!("[codegen] registered extension '{}'", extension.name());
        } else {
            log::debug!(
                "[codegen] extension '{}' already registered, ignoring",
                extension.name()
            );
        }
        added
    }

    /// Extension used when none of the registered ones accepts a type.
    pub fn set_default(&self, extension: ExtensionRef) {
        log::debug!("[codegen] default extension is now '{}'", extension.name());
        self.set.rcu(|current| {
            let mut next = ExtensionSet::clone(current);
            next.default = Some(Arc::clone(&extension));
            next
        });
    }

    /// First registered extension accepting `ty`, else the default if set.
    pub fn get_extension(&self, ty: &syn::Type) -> Option<ExtensionRef> {
        let set = self.set.load();
        set.extensions
            .iter()
            .find(|e| e.can_handle(ty))
            .or(set.default.as_ref())
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.set.load().extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of registered extensions, in priority order.
    pub fn extension_names(&self) -> Vec<String> {
        self.set
            .load()
            .extensions
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    /// Drop every extension and the default. Test isolation only.
    pub fn clear(&self) {
        log::debug!("[codegen] cleared");
        self.set.store(Arc::new(ExtensionSet::default()));
    }
}

impl fmt::Debug for CodegenExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.set.load();
        f.debug_struct("CodegenExtensionRegistry")
            .field(
                "extensions",
                &set.extensions.iter().map(|e| e.name()).collect::<Vec<_>>(),
            )
            .field("default", &set.default.as_ref().map(|e| e.name()))
            .finish()
    }
}

/// `TypeSite` expression for `ty`, using [`DefaultTypeCallExtension`] when
/// `registry` has nothing for it.
pub fn emit_type_call(
    registry: &CodegenExtensionRegistry,
    ty: &syn::Type,
    ctx: &CodegenContext,
) -> TokenStream {
    match registry.get_extension(ty) {
        Some(extension) => {
            log::trace!(
                "[codegen] {} -> '{}'",
                ty.to_token_stream(),
                extension.name()
            );
            extension.generate_type_call(ty, ctx)
        }
        None => DefaultTypeCallExtension.generate_type_call(ty, ctx),
    }
}
