// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service and callable descriptors.
//!
//! # Overview
//!
//! The code generator describes each service member as plain data
//! ([`MemberSignature`]). [`ServiceDescriptorBuilder`] resolves every
//! parameter and return type through a [`ProviderRegistry`] and classifies
//! the member:
//!
//! | Declared member | `returns_stream` | `is_non_suspending_invocation` |
//! |-----------------|------------------|--------------------------------|
//! | `fn stream() -> Stream<String>` | true | true |
//! | `async fn greet(name: String) -> String` | false | false |
//!
//! The resulting [`ServiceDescriptor`] is immutable and can be shared
//! across threads. [`ServiceDirectory`] caches one descriptor per service
//! type for transports that look services up by name.
//!
//! [`ProviderRegistry`]: crate::ProviderRegistry

mod builder;
mod callable;
mod directory;
mod signature;

pub use builder::{ServiceDescriptor, ServiceDescriptorBuilder};
pub use callable::{CallableDescriptor, ParameterDescriptor};
pub use directory::{global_directory, service_descriptor_of, DescribedService, ServiceDirectory};
pub use signature::{Invocation, MemberSignature, ParameterSignature, TypeSite};

#[cfg(test)]
mod tests;
