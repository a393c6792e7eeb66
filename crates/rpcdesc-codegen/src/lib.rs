// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rpcdesc-codegen - Build-time type-call extensions
//!
//! Code generators (derive macros, `build.rs` scripts) call into this crate
//! to decide, per declared type, which `TypeSite` expression to emit into
//! the generated service code, and to emit one `MemberSignature` expression
//! per trait method. It mirrors the runtime provider registry but only sees
//! `syn` types, and never links the runtime crate.
//!
//! ```rust
//! use quote::quote;
//! use rpcdesc_codegen::{emit_member_signature, CodegenContext, CodegenExtensionRegistry};
//!
//! let registry = CodegenExtensionRegistry::new();
//! let method: syn::TraitItemFn = syn::parse_quote! {
//!     fn stream(&self) -> impl Stream<Item = String> + Send;
//! };
//! let member = emit_member_signature(&registry, &method.sig, &method.attrs, &CodegenContext::new());
//!
//! // `::rpcdesc::MemberSignature::non_suspending("stream", ::rpcdesc::TypeSite::new(..))`
//! let expr: syn::Expr = syn::parse2(member).unwrap();
//! let rendered = quote!(#expr).to_string();
//! assert!(rendered.contains("non_suspending"));
//! assert!(rendered.contains("\"Stream\""));
//! ```

mod context;
mod extension;
mod lower;
mod registry;
mod signature;

pub use context::CodegenContext;
pub use extension::{DefaultTypeCallExtension, ExtensionRef, TypeCallExtension};
pub use lower::{lower_type_ref, type_name};
pub use registry::{emit_type_call, global, CodegenExtensionRegistry};
pub use signature::{emit_member_signature, emit_type_site};
