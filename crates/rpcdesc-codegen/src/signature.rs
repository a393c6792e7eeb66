// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member signatures for service trait methods.
//!
//! The emitted expressions build the runtime's `TypeSite` and
//! `MemberSignature` values, so generated code hands them straight to
//! `ServiceDescriptor::builder(..).members(..)` and resolution happens
//! against whichever `ProviderRegistry` builds the service.
//!
//! Declaration-site information comes from `#[rpc(..)]` attributes:
//!
//! | Attribute | On | Emitted |
//! |-----------|----|---------|
//! | `serializable` | method, parameter | `.annotated(Annotation::serializable())` |
//! | `serializers = <expr>` | method, parameter | `.with_metadata(<key>, <expr>)` |
//! | `optional` | parameter | `.optional_param(..)` instead of `.param(..)` |
//!
//! Method attributes describe the return site.

use crate::context::CodegenContext;
use crate::registry::{emit_type_call, CodegenExtensionRegistry};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, Pat, ReturnType, Signature};

const RPC_ATTRIBUTE: &str = "rpc";

/// `#[rpc(..)]` options collected from one declaration site.
#[derive(Debug, Default)]
struct SiteOptions {
    serializable: bool,
    serializers: Option<syn::Expr>,
    optional: bool,
}

impl SiteOptions {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(RPC_ATTRIBUTE)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("serializable") {
                    options.serializable = true;
                } else if meta.path.is_ident("serializers") {
                    options.serializers = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("optional") {
                    options.optional = true;
                } else {
                    return Err(meta.error("unsupported rpc attribute"));
                }
                Ok(())
            })?;
        }
        Ok(options)
    }

    fn apply(&self, mut site: TokenStream, ctx: &CodegenContext) -> TokenStream {
        let runtime = ctx.runtime();
        if self.serializable {
            site = quote!(#site.annotated(#runtime::Annotation::serializable()));
        }
        if let Some(table) = &self.serializers {
            let key = ctx.serializers_key();
            site = quote!(#site.with_metadata(#key, #table));
        }
        site
    }
}

/// `TypeSite` expression for `ty` declared with `attrs`.
///
/// The base site comes from [`emit_type_call`]; `serializable` and
/// `serializers` attributes are appended to it.
pub fn emit_type_site(
    registry: &CodegenExtensionRegistry,
    ty: &syn::Type,
    attrs: &[syn::Attribute],
    ctx: &CodegenContext,
) -> TokenStream {
    match SiteOptions::parse(attrs) {
        Ok(options) => options.apply(emit_type_call(registry, ty, ctx), ctx),
        Err(err) => err.to_compile_error(),
    }
}

/// `MemberSignature` expression for a service trait method.
///
/// `async fn` members are suspending, all others non-suspending. A missing
/// return type is `()`. `attrs` are the method's own attributes.
pub fn emit_member_signature(
    registry: &CodegenExtensionRegistry,
    sig: &Signature,
    attrs: &[syn::Attribute],
    ctx: &CodegenContext,
) -> TokenStream {
    match member_signature(registry, sig, attrs, ctx) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn member_signature(
    registry: &CodegenExtensionRegistry,
    sig: &Signature,
    attrs: &[syn::Attribute],
    ctx: &CodegenContext,
) -> syn::Result<TokenStream> {
    let runtime = ctx.runtime();
    let name = sig.ident.to_string();

    let return_options = SiteOptions::parse(attrs)?;
    if return_options.optional {
        return Err(syn::Error::new_spanned(
            &sig.ident,
            "`optional` applies to parameters only",
        ));
    }
    let unit: syn::Type = syn::parse_quote!(());
    let return_ty = match &sig.output {
        ReturnType::Default => &unit,
        ReturnType::Type(_, ty) => ty.as_ref(),
    };
    let returns = return_options.apply(emit_type_call(registry, return_ty, ctx), ctx);

    let constructor = if sig.asyncness.is_some() {
        quote!(suspending)
    } else {
        quote!(non_suspending)
    };

    let mut member = quote!(#runtime::MemberSignature::#constructor(#name, #returns));
    for input in &sig.inputs {
        let FnArg::Typed(param) = input else {
            continue;
        };
        let Pat::Ident(ident) = param.pat.as_ref() else {
            return Err(syn::Error::new_spanned(
                &param.pat,
                "service parameters need a plain name",
            ));
        };
        let param_name = ident.ident.to_string();
        let options = SiteOptions::parse(&param.attrs)?;
        let site = options.apply(emit_type_call(registry, &param.ty, ctx), ctx);
        member = if options.optional {
            quote!(#member.optional_param(#param_name, #site))
        } else {
            quote!(#member.param(#param_name, #site))
        };
    }

    log::trace!("[codegen] member '{}' emitted", name);
    Ok(member)
}
