// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tests for service descriptor assembly.

use super::*;
use crate::config::ResolverConfig;
use crate::descriptor::{DefaultTypeDescriptor, TypeDescriptor, TypeDescriptorRef};
use crate::error::{DescriptorError, DescriptorResult};
use crate::provider::TypeDescriptorProvider;
use crate::registry::ProviderRegistry;
use crate::types::{Annotation, Metadata, TypeRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn string() -> TypeRef {
    TypeRef::new("String")
}

fn news_service(registry: &ProviderRegistry) -> ServiceDescriptor {
    ServiceDescriptor::builder("news::NewsService")
        .member(MemberSignature::non_suspending(
            "stream",
            TypeRef::stream(string()),
        ))
        .member(MemberSignature::suspending("greet", string()).param("name", string()))
        .build(registry)
        .expect("valid service")
}

#[test]
fn stream_member_classification() {
    let registry = ProviderRegistry::new();
    let service = news_service(&registry);
    let stream = service.callable("stream").expect("stream callable");

    assert!(stream.returns_stream());
    assert!(stream.is_non_suspending_invocation());
    assert_eq!(stream.return_type().to_string(), "Stream<String>");
    assert_eq!(
        stream.return_type().underlying_type(),
        &TypeRef::stream(string())
    );
    assert!(stream.parameters().is_empty());
    assert_eq!(stream.stream_element(), Some(&string()));
}

#[test]
fn suspending_member_classification() {
    let registry = ProviderRegistry::new();
    let service = news_service(&registry);
    let greet = service.callable("greet").expect("greet callable");

    assert!(!greet.returns_stream());
    assert!(!greet.is_non_suspending_invocation());
    assert_eq!(greet.return_type().to_string(), "String");

    let params: Vec<_> = greet.parameter_types().map(|t| t.to_string()).collect();
    assert_eq!(params, vec!["String"]);
    assert_eq!(greet.parameters()[0].name(), "name");
    assert!(!greet.parameters()[0].is_optional());
}

#[test]
fn flags_are_independent() {
    let registry = ProviderRegistry::new();
    let service = ServiceDescriptor::builder("Events")
        // Plain value handed back without awaiting
        .member(MemberSignature::non_suspending("snapshot", TypeRef::new("u64")))
        // Awaited call that returns a stream handle
        .member(MemberSignature::suspending(
            "subscribe",
            TypeRef::stream(TypeRef::new("Event")),
        ))
        .build(&registry)
        .expect("valid service");

    let snapshot = service.callable("snapshot").expect("snapshot");
    assert!(!snapshot.returns_stream());
    assert!(snapshot.is_non_suspending_invocation());

    let subscribe = service.callable("subscribe").expect("subscribe");
    assert!(subscribe.returns_stream());
    assert!(!subscribe.is_non_suspending_invocation());
}

#[test]
fn stream_wrapper_name_comes_from_config() {
    let registry = ProviderRegistry::with_config(ResolverConfig {
        stream_type_name: "Flow".to_string(),
        ..ResolverConfig::default()
    });
    let service = ServiceDescriptor::builder("Ticker")
        .member(MemberSignature::non_suspending(
            "ticks",
            TypeRef::generic("Flow", [TypeRef::new("u64")]),
        ))
        .member(MemberSignature::non_suspending(
            "legacy",
            TypeRef::stream(TypeRef::new("u64")),
        ))
        .build(&registry)
        .expect("valid service");

    let ticks = service.callable("ticks").expect("ticks");
    assert!(ticks.returns_stream());
    assert_eq!(ticks.stream_element(), Some(&TypeRef::new("u64")));

    let legacy = service.callable("legacy").expect("legacy");
    assert!(!legacy.returns_stream());
    assert_eq!(legacy.stream_element(), None);
}

#[test]
fn duplicate_member_rejected() {
    let registry = ProviderRegistry::new();
    let err = ServiceDescriptor::builder("Calc")
        .member(MemberSignature::suspending("add", TypeRef::new("i64")))
        .member(MemberSignature::suspending("add", TypeRef::new("f64")))
        .build(&registry)
        .unwrap_err();

    assert!(matches!(
        err,
        DescriptorError::DuplicateCallable { ref service, ref callable }
            if service == "Calc" && callable == "add"
    ));
}

#[test]
fn empty_names_rejected() {
    let registry = ProviderRegistry::new();
    assert!(matches!(
        ServiceDescriptor::builder(" ").build(&registry),
        Err(DescriptorError::EmptyServiceName)
    ));

    let err = ServiceDescriptor::builder("Calc")
        .member(MemberSignature::suspending("", TypeRef::unit()))
        .build(&registry)
        .unwrap_err();
    assert!(matches!(err, DescriptorError::EmptyCallableName { .. }));
}

#[test]
fn names_and_lookup() {
    let registry = ProviderRegistry::new();
    let service = news_service(&registry);

    assert_eq!(service.fq_name(), "news::NewsService");
    assert_eq!(service.simple_name(), "NewsService");
    assert_eq!(service.len(), 2);
    assert!(service.callable("missing").is_none());

    let names: Vec<&str> = service.callables().keys().map(|k| &**k).collect();
    assert_eq!(names, vec!["greet", "stream"]);

    let dotted = ServiceDescriptor::builder("com.example.Echo")
        .build(&registry)
        .expect("empty service is valid");
    assert_eq!(dotted.simple_name(), "Echo");
    assert!(dotted.is_empty());
}

/// Counts how many types it served; accepts types annotated `@wire`.
struct WireProvider {
    served: AtomicUsize,
}

impl TypeDescriptorProvider for WireProvider {
    fn can_handle(&self, _ty: &TypeRef, annotations: &[Annotation]) -> bool {
        annotations.iter().any(|a| a.path() == "wire")
    }

    fn create(
        &self,
        ty: &TypeRef,
        annotations: &[Annotation],
        _metadata: &Metadata,
    ) -> TypeDescriptorRef {
        self.served.fetch_add(1, Ordering::SeqCst);
        Arc::new(DefaultTypeDescriptor::new(ty.clone(), annotations.to_vec()))
    }
}

#[test]
fn every_type_goes_through_the_registry() {
    let registry = ProviderRegistry::new();
    let wire = Arc::new(WireProvider {
        served: AtomicUsize::new(0),
    });
    registry.register(wire.clone());

    let user = TypeSite::new(TypeRef::new("User")).annotated(Annotation::new("wire"));
    ServiceDescriptor::builder("Users")
        .member(
            MemberSignature::suspending("update", user.clone())
                .param("user", user.clone())
                .optional_param("note", string()),
        )
        .build(&registry)
        .expect("valid service");

    // Return type and first parameter; the plain String goes to the default
    assert_eq!(wire.served.load(Ordering::SeqCst), 2);
}

#[test]
fn descriptors_share_across_threads() {
    let registry = ProviderRegistry::new();
    let service = news_service(&registry);

    std::thread::scope(|s| {
        for _ in 0..4 {
            let service = service.clone();
            s.spawn(move || {
                assert!(service.callable("stream").expect("stream").returns_stream());
            });
        }
    });
}

struct NewsService;

impl DescribedService for NewsService {
    const SERVICE_NAME: &'static str = "news::NewsService";

    fn members() -> Vec<MemberSignature> {
        vec![
            MemberSignature::non_suspending("stream", TypeRef::stream(string())),
            MemberSignature::suspending("greet", string()).param("name", string()),
        ]
    }
}

struct BrokenService;

impl DescribedService for BrokenService {
    const SERVICE_NAME: &'static str = "Broken";

    fn members() -> Vec<MemberSignature> {
        vec![
            MemberSignature::suspending("ping", TypeRef::unit()),
            MemberSignature::suspending("ping", TypeRef::unit()),
        ]
    }
}

#[test]
fn directory_caches_per_service() {
    let registry = ProviderRegistry::new();
    let directory = ServiceDirectory::new();

    let first = directory
        .descriptor_of::<NewsService>(&registry)
        .expect("descriptor");
    let second = directory
        .descriptor_of::<NewsService>(&registry)
        .expect("descriptor");
    assert!(Arc::ptr_eq(&first, &second));

    let by_name = directory.lookup("news::NewsService").expect("published");
    assert!(Arc::ptr_eq(&first, &by_name));
    assert_eq!(directory.list(), vec!["news::NewsService"]);
}

#[test]
fn directory_does_not_cache_failures() {
    let registry = ProviderRegistry::new();
    let directory = ServiceDirectory::new();

    assert!(directory.descriptor_of::<BrokenService>(&registry).is_err());
    assert!(directory.lookup("Broken").is_none());
    assert!(directory.list().is_empty());
}

#[test]
fn directory_publish_and_withdraw() {
    let registry = ProviderRegistry::new();
    let directory = ServiceDirectory::new();

    directory.publish(news_service(&registry));
    let replacement = ServiceDescriptor::builder("news::NewsService")
        .build(&registry)
        .expect("empty service");
    directory.publish(replacement);
    assert!(directory.lookup("news::NewsService").expect("present").is_empty());

    assert!(directory.withdraw("news::NewsService").is_some());
    assert!(directory.withdraw("news::NewsService").is_none());
    assert!(directory.lookup("news::NewsService").is_none());
}

#[test]
fn global_lookup_uses_global_registry() {
    let descriptor = service_descriptor_of::<NewsService>().expect("descriptor");
    let again = service_descriptor_of::<NewsService>().expect("descriptor");
    assert!(Arc::ptr_eq(&descriptor, &again));
    assert!(descriptor.callable("stream").expect("stream").returns_stream());
}

#[test]
fn withdrawn_service_is_rebuilt_and_republished() {
    let registry = ProviderRegistry::new();
    let directory = ServiceDirectory::new();

    let first = directory
        .descriptor_of::<NewsService>(&registry)
        .expect("descriptor");
    assert!(directory.withdraw("news::NewsService").is_some());

    let rebuilt = directory
        .descriptor_of::<NewsService>(&registry)
        .expect("descriptor");
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    let by_name = directory.lookup("news::NewsService").expect("republished");
    assert!(Arc::ptr_eq(&rebuilt, &by_name));
}

#[test]
fn published_replacement_wins_over_cached_build() {
    let registry = ProviderRegistry::new();
    let directory = ServiceDirectory::new();
    directory
        .descriptor_of::<NewsService>(&registry)
        .expect("descriptor");

    let replacement = directory.publish(
        ServiceDescriptor::builder("news::NewsService")
            .build(&registry)
            .expect("empty service"),
    );
    let typed = directory
        .descriptor_of::<NewsService>(&registry)
        .expect("descriptor");
    assert!(Arc::ptr_eq(&typed, &replacement));
    assert!(typed.is_empty());
}

struct MisnamedService;

impl DescribedService for MisnamedService {
    const SERVICE_NAME: &'static str = "a::Declared";

    fn members() -> Vec<MemberSignature> {
        Vec::new()
    }

    fn describe(registry: &ProviderRegistry) -> DescriptorResult<ServiceDescriptor> {
        ServiceDescriptor::builder("b::Other").build(registry)
    }
}

#[test]
fn describe_must_keep_declared_name() {
    let registry = ProviderRegistry::new();
    let directory = ServiceDirectory::new();

    let err = directory
        .descriptor_of::<MisnamedService>(&registry)
        .unwrap_err();
    assert!(matches!(err, DescriptorError::ServiceNameMismatch { .. }));
    assert!(directory.list().is_empty());
}
