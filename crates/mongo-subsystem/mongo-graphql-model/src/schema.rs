// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;

/// The identity field of every stored document. Fetched whenever a referenced
/// document is populated, whether or not the query asked for it.
pub const ID_FIELD: &str = "id";

/// The discriminator tag path. Models produced by a discriminator carry this
/// path flagged as always-select so the tag survives any narrowed fetch.
pub const TYPE_KEY: &str = "__t";

/// Storage schema of one model: its paths in declaration order, each with a
/// type descriptor.
///
/// Nested non-array sub-objects are expressed as dotted top-level paths (the
/// storage layer flattens them); raw [`PathKind::Document`] descriptors occur
/// only inside array elements, where the storage layer leaves them unflattened.
#[derive(Debug, Clone, Default)]
pub struct ModelSchema {
    paths: IndexMap<String, PathType>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a path on this schema. Declaration order is preserved.
    pub fn path(mut self, name: impl Into<String>, typ: PathType) -> Self {
        self.paths.insert(name.into(), typ);
        self
    }

    pub fn paths(&self) -> impl Iterator<Item = (&str, &PathType)> {
        self.paths.iter().map(|(name, typ)| (name.as_str(), typ))
    }

    pub fn path_type(&self, name: &str) -> Option<&PathType> {
        self.paths.get(name)
    }
}

/// Type descriptor of a single schema path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathType {
    pub kind: PathKind,
    /// The storage-level "select" flag: fetch this path whenever its model is
    /// populated, regardless of the query's selection.
    pub always_select: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathKind {
    Scalar,
    /// A raw nested sub-object descriptor (keys to descriptors).
    Document(IndexMap<String, PathType>),
    /// A reference to another model's documents, by model name.
    Reference(String),
    /// An array of element descriptors.
    Array(Vec<PathType>),
}

impl PathType {
    pub fn scalar() -> Self {
        Self {
            kind: PathKind::Scalar,
            always_select: false,
        }
    }

    pub fn document<K, I>(paths: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PathType)>,
    {
        Self {
            kind: PathKind::Document(
                paths
                    .into_iter()
                    .map(|(name, typ)| (name.into(), typ))
                    .collect(),
            ),
            always_select: false,
        }
    }

    pub fn reference(model_name: impl Into<String>) -> Self {
        Self {
            kind: PathKind::Reference(model_name.into()),
            always_select: false,
        }
    }

    pub fn array(elements: Vec<PathType>) -> Self {
        Self {
            kind: PathKind::Array(elements),
            always_select: false,
        }
    }

    /// Flag this path as always-select.
    pub fn always_select(mut self) -> Self {
        self.always_select = true;
        self
    }
}
