// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-call extensions.

use crate::context::CodegenContext;
use crate::lower::lower_type_ref;
use proc_macro2::TokenStream;
use quote::quote;
use std::sync::Arc;

/// Emits the expression that builds the declaration site of one type.
///
/// The emitted expression must evaluate to the runtime's `TypeSite`.
/// Attribute-driven annotations and metadata are appended by
/// [`emit_type_site`](crate::emit_type_site), so extensions only decide the
/// base site for the type.
pub trait TypeCallExtension: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether this extension should handle `ty`. Pure and cheap.
    fn can_handle(&self, ty: &syn::Type) -> bool;

    /// Expression for `ty`. Unsupported input is reported as
    /// `compile_error!` tokens, never by panicking.
    fn generate_type_call(&self, ty: &syn::Type, ctx: &CodegenContext) -> TokenStream;
}

/// Shared handle to an extension.
pub type ExtensionRef = Arc<dyn TypeCallExtension>;

/// Bare site for the lowered `TypeRef`, resolved later by whatever registry
/// builds the service.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTypeCallExtension;

impl TypeCallExtension for DefaultTypeCallExtension {
    fn name(&self) -> &str {
        "default"
    }

    fn can_handle(&self, _ty: &syn::Type) -> bool {
        true
    }

    fn generate_type_call(&self, ty: &syn::Type, ctx: &CodegenContext) -> TokenStream {
        let type_ref = match lower_type_ref(ty, ctx.runtime()) {
            Ok(tokens) => tokens,
            Err(err) => return err.to_compile_error(),
        };
        let runtime = ctx.runtime();
        quote!(#runtime::TypeSite::new(#type_ref))
    }
}
