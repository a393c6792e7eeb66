// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lowering of `syn` types into runtime `TypeRef` constructor expressions.
//!
//! A type is identified by the last segment of its path, as written, and
//! its generic type arguments:
//!
//! | Declared | Lowered |
//! |----------|---------|
//! | `String`, `std::string::String` | `TypeRef::new("String")` |
//! | `Vec<u8>` | `TypeRef::generic("Vec", [u8])` |
//! | `impl Stream<Item = T> + Send` | `TypeRef::generic("Stream", [T])` |
//! | `Option<T>` | `T.nullable()` |
//! | `&'a T`, `(T)` | same as `T` |
//! | `()` / `(A, B)` | `TypeRef::unit()` / `TypeRef::tuple([A, B])` |
//!
//! Lifetimes are dropped. Arrays, slices, pointers, function pointers and
//! qualified paths are rejected.

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{GenericArgument, Path, PathArguments, Type, TypeParamBound};

/// Marker traits skipped when picking the trait that names an `impl`/`dyn` type.
const AUTO_TRAITS: &[&str] = &["Send", "Sync", "Unpin"];

/// Expression building the runtime `TypeRef` for `ty`.
pub fn lower_type_ref(ty: &Type, runtime: &Path) -> syn::Result<TokenStream> {
    match ty {
        Type::Path(path) if path.qself.is_none() => lower_path(&path.path, runtime),
        Type::Reference(reference) => lower_type_ref(&reference.elem, runtime),
        Type::Paren(paren) => lower_type_ref(&paren.elem, runtime),
        Type::Group(group) => lower_type_ref(&group.elem, runtime),
        Type::Tuple(tuple) if tuple.elems.is_empty() => Ok(quote!(#runtime::TypeRef::unit())),
        Type::Tuple(tuple) => {
            let elems = tuple
                .elems
                .iter()
                .map(|elem| lower_type_ref(elem, runtime))
                .collect::<syn::Result<Vec<_>>>()?;
            Ok(quote!(#runtime::TypeRef::tuple([#(#elems),*])))
        }
        Type::ImplTrait(imp) => match naming_trait(&imp.bounds) {
            Some(path) => lower_path(path, runtime),
            None => Err(syn::Error::new_spanned(ty, "`impl` type needs a naming trait")),
        },
        Type::TraitObject(object) => match naming_trait(&object.bounds) {
            Some(path) => lower_path(path, runtime),
            None => Err(syn::Error::new_spanned(ty, "`dyn` type needs a naming trait")),
        },
        _ => Err(syn::Error::new_spanned(
            ty,
            "unsupported type in service signature",
        )),
    }
}

/// Name the lowered `TypeRef` would carry, if `ty` is supported.
///
/// Extensions use this in `can_handle` to match on a type by name.
pub fn type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) if path.qself.is_none() => match option_inner(&path.path) {
            Some(inner) => type_name(inner),
            None => last_ident(&path.path),
        },
        Type::Reference(reference) => type_name(&reference.elem),
        Type::Paren(paren) => type_name(&paren.elem),
        Type::Group(group) => type_name(&group.elem),
        Type::Tuple(_) => Some("()".to_string()),
        Type::ImplTrait(imp) => naming_trait(&imp.bounds).and_then(last_ident),
        Type::TraitObject(object) => naming_trait(&object.bounds).and_then(last_ident),
        _ => None,
    }
}

fn last_ident(path: &Path) -> Option<String> {
    path.segments.last().map(|seg| seg.ident.to_string())
}

/// `T` of an `Option<T>` path.
fn option_inner(path: &Path) -> Option<&Type> {
    let last = path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(generic) if generic.args.len() == 1 => {
            match generic.args.first() {
                Some(GenericArgument::Type(inner)) => Some(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

fn naming_trait<P>(bounds: &Punctuated<TypeParamBound, P>) -> Option<&Path> {
    bounds
        .iter()
        .filter_map(|bound| match bound {
            TypeParamBound::Trait(bound) => Some(&bound.path),
            _ => None,
        })
        .find(|path| {
            last_ident(path).is_some_and(|name| !AUTO_TRAITS.contains(&name.as_str()))
        })
}

fn lower_path(path: &Path, runtime: &Path) -> syn::Result<TokenStream> {
    if let Some(inner) = option_inner(path) {
        let inner = lower_type_ref(inner, runtime)?;
        return Ok(quote!(#inner.nullable()));
    }

    let Some(last) = path.segments.last() else {
        return Err(syn::Error::new_spanned(path, "empty type path"));
    };
    let name = last.ident.to_string();

    let args = match &last.arguments {
        PathArguments::None => Vec::new(),
        PathArguments::AngleBracketed(generic) => generic
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(lower_type_ref(ty, runtime)),
                // `Stream<Item = T>` carries its element as an associated type
                GenericArgument::AssocType(assoc) => Some(lower_type_ref(&assoc.ty, runtime)),
                GenericArgument::Lifetime(_) => None,
                other => Some(Err(syn::Error::new_spanned(
                    other,
                    "unsupported generic argument",
                ))),
            })
            .collect::<syn::Result<Vec<_>>>()?,
        PathArguments::Parenthesized(_) => {
            return Err(syn::Error::new_spanned(
                path,
                "function-style trait types are not supported",
            ));
        }
    };

    if args.is_empty() {
        Ok(quote!(#runtime::TypeRef::new(#name)))
    } else {
        Ok(quote!(#runtime::TypeRef::generic(#name, [#(#args),*])))
    }
}
