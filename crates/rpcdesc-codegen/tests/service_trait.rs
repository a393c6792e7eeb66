// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Drives the extension registry the way a service generator does: one
//! member signature per trait method, then the emitted expressions are
//! evaluated against the runtime and built into a service descriptor.

use proc_macro2::TokenStream;
use quote::quote;
use rpcdesc::{
    Annotation, MemberSignature, ProviderRegistry, SerializerTable, ServiceDescriptor,
    TypeDescriptor, TypeRef, TypeSite,
};
use rpcdesc_codegen::{
    emit_member_signature, type_name, CodegenContext, CodegenExtensionRegistry, TypeCallExtension,
};
use std::sync::{Arc, OnceLock};
use syn::{ItemTrait, TraitItem, Type};

fn news_service() -> ItemTrait {
    syn::parse_quote! {
        trait NewsService {
            fn stream(&self) -> impl Stream<Item = String> + Send;
            async fn greet(&self, name: String) -> String;
            async fn archive(&self, ids: Vec<Uuid>) -> ();
            #[rpc(serializable, serializers = news_serializers())]
            async fn publish(
                &self,
                #[rpc(serializable, serializers = news_serializers())] event: Event,
                #[rpc(optional)] tag: Option<String>,
            ) -> Event;
        }
    }
}

/// (member name, emitted `MemberSignature` expression)
fn emit_members(
    item: &ItemTrait,
    registry: &CodegenExtensionRegistry,
    ctx: &CodegenContext,
) -> Vec<(String, TokenStream)> {
    item.items
        .iter()
        .filter_map(|item| match item {
            TraitItem::Fn(method) => Some(method),
            _ => None,
        })
        .map(|method| {
            (
                method.sig.ident.to_string(),
                emit_member_signature(registry, &method.sig, &method.attrs, ctx),
            )
        })
        .collect()
}

fn squash(tokens: &TokenStream) -> String {
    tokens.to_string().split_whitespace().collect()
}

/// Tokens of an expression together with its value.
macro_rules! tokens_and_value {
    ($($expr:tt)*) => {
        (quote!($($expr)*), $($expr)*)
    };
}

#[derive(Debug)]
struct EventCodec;

fn news_serializers() -> SerializerTable {
    static TABLE: OnceLock<SerializerTable> = OnceLock::new();
    TABLE
        .get_or_init(|| SerializerTable::new().with("Event", Arc::new(EventCodec)))
        .clone()
}

#[test]
fn default_extension_covers_every_member() {
    let registry = CodegenExtensionRegistry::new();
    let members = emit_members(&news_service(), &registry, &CodegenContext::new());
    let names: Vec<&str> = members.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["stream", "greet", "archive", "publish"]);

    let (_, stream) = &members[0];
    assert!(squash(stream).starts_with("::rpcdesc::MemberSignature::non_suspending(\"stream\""));
    assert!(squash(stream).contains(
        "::rpcdesc::TypeRef::generic(\"Stream\",[::rpcdesc::TypeRef::new(\"String\")])"
    ));

    let (_, greet) = &members[1];
    assert!(squash(greet).starts_with("::rpcdesc::MemberSignature::suspending(\"greet\""));
    assert!(squash(greet).contains(".param(\"name\",::rpcdesc::TypeSite::new("));

    for (name, member) in &members {
        assert!(!member.to_string().contains("compile_error"), "{}", name);
        syn::parse2::<syn::Expr>(member.clone()).expect("valid expression");
    }
}

#[test]
fn emitted_members_build_a_service_descriptor() {
    let ctx = CodegenContext::new();
    let members = emit_members(&news_service(), &CodegenExtensionRegistry::new(), &ctx);

    // The same expressions, written out and evaluated against the runtime
    let (stream_tokens, stream) = tokens_and_value! {
        ::rpcdesc::MemberSignature::non_suspending(
            "stream",
            ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::generic(
                "Stream",
                [::rpcdesc::TypeRef::new("String")]
            ))
        )
    };
    let (greet_tokens, greet) = tokens_and_value! {
        ::rpcdesc::MemberSignature::suspending(
            "greet",
            ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::new("String"))
        )
        .param("name", ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::new("String")))
    };
    let (archive_tokens, archive) = tokens_and_value! {
        ::rpcdesc::MemberSignature::suspending(
            "archive",
            ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::unit())
        )
        .param(
            "ids",
            ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::generic(
                "Vec",
                [::rpcdesc::TypeRef::new("Uuid")]
            ))
        )
    };
    let (publish_tokens, publish) = tokens_and_value! {
        ::rpcdesc::MemberSignature::suspending(
            "publish",
            ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::new("Event"))
                .annotated(::rpcdesc::Annotation::serializable())
                .with_metadata("serializers", news_serializers())
        )
        .param(
            "event",
            ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::new("Event"))
                .annotated(::rpcdesc::Annotation::serializable())
                .with_metadata("serializers", news_serializers())
        )
        .optional_param(
            "tag",
            ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::new("String").nullable())
        )
    };

    let expected = [stream_tokens, greet_tokens, archive_tokens, publish_tokens];
    for ((name, emitted), written) in members.iter().zip(&expected) {
        assert_eq!(squash(emitted), squash(written), "{}", name);
    }

    let registry = ProviderRegistry::new();
    rpcdesc_serial::register_serializer_provider(&registry);
    let signatures: Vec<MemberSignature> = vec![stream, greet, archive, publish];
    let service = ServiceDescriptor::builder("news::NewsService")
        .members(signatures)
        .build(&registry)
        .expect("valid service");
    assert_eq!(service.len(), 4);

    let stream = service.callable("stream").expect("stream");
    assert!(stream.returns_stream());
    assert!(stream.is_non_suspending_invocation());

    let publish = service.callable("publish").expect("publish");
    assert!(!publish.is_non_suspending_invocation());
    assert_eq!(publish.return_type().serializers(), Some(&news_serializers()));
    let event = &publish.parameters()[0];
    assert_eq!(event.name(), "event");
    assert_eq!(event.ty().serializers(), Some(&news_serializers()));
    assert_eq!(event.ty().annotations(), &[Annotation::serializable()][..]);

    let tag = &publish.parameters()[1];
    assert!(tag.is_optional());
    assert_eq!(tag.ty().underlying_type(), &TypeRef::new("String").nullable());
    assert_eq!(tag.ty().serializers(), None);

    let greet = service.callable("greet").expect("greet");
    assert_eq!(greet.parameters()[0].ty().serializers(), None);
}

/// Routes `Uuid` (alone or as a generic argument) to a dedicated helper.
struct UuidExtension;

impl TypeCallExtension for UuidExtension {
    fn name(&self) -> &str {
        "uuid"
    }

    fn can_handle(&self, ty: &Type) -> bool {
        quote!(#ty).to_string().contains("Uuid")
    }

    fn generate_type_call(&self, ty: &Type, ctx: &CodegenContext) -> TokenStream {
        let runtime = ctx.runtime();
        let outer = type_name(ty).unwrap_or_default();
        quote!(#runtime::uuid::site(#outer))
    }
}

#[test]
fn registered_extension_takes_matching_types() {
    let registry = CodegenExtensionRegistry::new();
    registry.register(Arc::new(UuidExtension));

    let ctx = CodegenContext::new().with_runtime(syn::parse_quote!(::app::rpc));
    let members = emit_members(&news_service(), &registry, &ctx);

    let (name, archive) = &members[2];
    assert_eq!(name, "archive");
    assert_eq!(
        squash(archive),
        squash(&quote!(::app::rpc::MemberSignature::suspending(
            "archive",
            ::app::rpc::TypeSite::new(::app::rpc::TypeRef::unit())
        )
        .param("ids", ::app::rpc::uuid::site("Vec"))))
    );

    // Members without a Uuid still go through the default
    let (_, greet) = &members[1];
    assert!(squash(greet).contains(
        ".param(\"name\",::app::rpc::TypeSite::new(::app::rpc::TypeRef::new(\"String\")))"
    ));
}

#[test]
fn site_values_match_hand_built_sites() {
    let (tokens, site) = tokens_and_value! {
        ::rpcdesc::TypeSite::new(::rpcdesc::TypeRef::new("Event"))
            .annotated(::rpcdesc::Annotation::serializable())
    };
    let attrs: Vec<syn::Attribute> = vec![syn::parse_quote!(#[rpc(serializable)])];
    let emitted = rpcdesc_codegen::emit_type_site(
        &CodegenExtensionRegistry::new(),
        &syn::parse_quote!(Event),
        &attrs,
        &CodegenContext::new(),
    );
    assert_eq!(squash(&emitted), squash(&tokens));
    assert_eq!(
        site,
        TypeSite::new(TypeRef::new("Event")).annotated(Annotation::serializable())
    );
}
