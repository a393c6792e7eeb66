// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

/// Paths and names the generated code refers to.
#[derive(Debug, Clone)]
pub struct CodegenContext {
    runtime: syn::Path,
    serializers_key: String,
}

impl CodegenContext {
    /// Runtime at `::rpcdesc`, serializer tables under `"serializers"`.
    pub fn new() -> Self {
        Self {
            runtime: syn::parse_quote!(::rpcdesc),
            serializers_key: "serializers".to_string(),
        }
    }

    /// Use a re-exported runtime path (e.g. `::my_rpc::rpcdesc`).
    #[must_use]
    pub fn with_runtime(mut self, runtime: syn::Path) -> Self {
        self.runtime = runtime;
        self
    }

    /// Metadata key for `#[rpc(serializers = ..)]`. Must match the runtime
    /// `ResolverConfig::serializers_key`.
    #[must_use]
    pub fn with_serializers_key(mut self, key: impl Into<String>) -> Self {
        self.serializers_key = key.into();
        self
    }

    pub fn runtime(&self) -> &syn::Path {
        &self.runtime
    }

    pub fn serializers_key(&self) -> &str {
        &self.serializers_key
    }
}

impl Default for CodegenContext {
    fn default() -> Self {
        Self::new()
    }
}
