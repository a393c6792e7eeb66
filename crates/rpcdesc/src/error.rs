// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for descriptor construction.
//!
//! Type resolution itself never fails; these errors only come out of
//! service assembly and configuration loading.

use std::fmt;

/// Result type for descriptor operations
pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Errors that can occur while assembling descriptors
#[derive(Debug)]
pub enum DescriptorError {
    /// Two members of one service share a name (overloads are not supported)
    DuplicateCallable { service: String, callable: String },

    /// Service was declared with an empty name
    EmptyServiceName,

    /// A member of the service has an empty name
    EmptyCallableName { service: String },

    /// A service type described itself under a name other than its declared one
    ServiceNameMismatch { declared: String, built: String },

    /// Configuration failed validation
    Config(String),

    /// Configuration document is not valid JSON for `ResolverConfig`
    #[cfg(feature = "config-loaders")]
    Json(serde_json::Error),
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCallable { service, callable } => {
                write!(f, "Duplicate callable '{}' in service '{}'", callable, service)
            }
            Self::EmptyServiceName => write!(f, "Service name must not be empty"),
            Self::EmptyCallableName { service } => {
                write!(f, "Service '{}' declares a callable with an empty name", service)
            }
            Self::ServiceNameMismatch { declared, built } => write!(
                f,
                "Service declared as '{}' built a descriptor named '{}'",
                declared, built
            ),
            Self::Config(msg) => write!(f, "Invalid resolver config: {}", msg),
            #[cfg(feature = "config-loaders")]
            Self::Json(e) => write!(f, "Resolver config JSON error: {}", e),
        }
    }
}

impl std::error::Error for DescriptorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config-loaders")]
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "config-loaders")]
impl From<serde_json::Error> for DescriptorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
