// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compatibility shim for generators that cannot tag annotations.
//!
//! Some generators only emit an annotation's path and arguments, without
//! the [`AnnotationKind`](crate::AnnotationKind) capability tag. For those,
//! the serialization opt-in is recognised by the annotation path alone:
//! either the marker path itself or a path ending in `::` followed by it
//! (`::rpcdesc::Serializable`, `reexport::rpcdesc::Serializable`). Arguments
//! are never inspected. Prefer the structural tag; the shim is disabled
//! with `ResolverConfig::textual_annotation_fallback`.

use crate::types::{Annotation, SERIALIZABLE_MARKER_PATH};

/// True if the path of `annotation` names the serialization opt-in marker.
pub fn names_serialization_opt_in(annotation: &Annotation) -> bool {
    let path = annotation.path();
    let matched = path == SERIALIZABLE_MARKER_PATH
        || path
            .strip_suffix(SERIALIZABLE_MARKER_PATH)
            .is_some_and(|prefix| prefix.ends_with("::"));
    if matched && !annotation.is_serialization_opt_in() {
        log::debug!(
            "[compat] '{}' matched the opt-in marker by path only",
            annotation
        );
    }
    matched
}
