// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Protocol-specific side data passed to providers at resolution time.
//!
//! Values are a closed set of shapes. A provider that expects one shape
//! under a key and finds another treats the entry as absent.

use crate::descriptor::SerializerTable;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Serializer table (read by serializer-aware providers).
    Serializers(SerializerTable),
    Text(Arc<str>),
    Integer(i64),
    Flag(bool),
}

impl MetadataValue {
    /// Short shape name for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Serializers(_) => "serializers",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Flag(_) => "flag",
        }
    }

    pub fn as_serializers(&self) -> Option<&SerializerTable> {
        match self {
            Self::Serializers(table) => Some(table),
            _ => None,
        }
    }
}

impl From<SerializerTable> for MetadataValue {
    fn from(table: SerializerTable) -> Self {
        Self::Serializers(table)
    }
}

impl From<&str> for MetadataValue {
    fn from(text: &str) -> Self {
        Self::Text(Arc::from(text))
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Key/value metadata map. Keys are unique; iteration is ordered by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: BTreeMap<Arc<str>, MetadataValue>,
}

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<Arc<str>>, value: impl Into<MetadataValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert, returning the value previously stored under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<Arc<str>>,
        value: impl Into<MetadataValue>,
    ) -> Option<MetadataValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(key, value)| (&**key, value))
    }
}
