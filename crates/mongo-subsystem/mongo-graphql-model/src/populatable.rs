// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Serialize;

use crate::schema::{ID_FIELD, ModelSchema, PathKind, PathType};

/// One storage path on a model whose value is (or contains) a reference to
/// another model's documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulatableField {
    pub path: String,
    pub model_name: String,
}

/// Walk a model's schema paths and extract its populatable fields.
///
/// Array elements are descended per key (producing dotted paths for
/// sub-document arrays); a raw nested sub-object is never descended into for
/// references. Each path is emitted at most once.
pub fn populatable_fields(schema: &ModelSchema) -> Vec<PopulatableField> {
    let mut fields = Vec::new();

    for (path, typ) in schema.paths() {
        collect(path, typ, &mut fields);
    }

    fields
}

fn collect(path: &str, typ: &PathType, fields: &mut Vec<PopulatableField>) {
    match &typ.kind {
        PathKind::Reference(model_name) => push_unique(path, model_name, fields),
        PathKind::Array(elements) => {
            for element in elements {
                match &element.kind {
                    PathKind::Reference(model_name) => push_unique(path, model_name, fields),
                    PathKind::Document(paths) => {
                        for (key, sub) in paths {
                            collect(&format!("{path}.{key}"), sub, fields);
                        }
                    }
                    PathKind::Array(_) => collect(path, element, fields),
                    PathKind::Scalar => {}
                }
            }
        }
        PathKind::Scalar | PathKind::Document(_) => {}
    }
}

fn push_unique(path: &str, model_name: &str, fields: &mut Vec<PopulatableField>) {
    if !fields.iter().any(|field| field.path == path) {
        fields.push(PopulatableField {
            path: path.to_string(),
            model_name: model_name.to_string(),
        });
    }
}

/// The select paths mandated by the schema whenever this model is populated:
/// the identity field first, then every always-select path that is not a
/// reference (for arrays: whose last element is not a reference), in schema
/// order.
pub fn mandatory_select_paths(schema: &ModelSchema) -> Vec<String> {
    let mut paths = vec![ID_FIELD.to_string()];

    for (path, typ) in schema.paths() {
        if !typ.always_select {
            continue;
        }

        match &typ.kind {
            PathKind::Reference(_) => {}
            PathKind::Array(elements) => {
                if !matches!(
                    elements.last(),
                    Some(PathType {
                        kind: PathKind::Reference(_),
                        ..
                    })
                ) {
                    paths.push(path.to_string());
                }
            }
            _ => paths.push(path.to_string()),
        }
    }

    paths
}

/// The always-select paths of this model that reference other models (directly
/// or as an array whose last element is a reference), in schema order.
pub fn always_selected_references(schema: &ModelSchema) -> Vec<PopulatableField> {
    let mut fields = Vec::new();

    for (path, typ) in schema.paths() {
        if !typ.always_select {
            continue;
        }

        let referenced = match &typ.kind {
            PathKind::Reference(model_name) => Some(model_name),
            PathKind::Array(elements) => match elements.last() {
                Some(PathType {
                    kind: PathKind::Reference(model_name),
                    ..
                }) => Some(model_name),
                _ => None,
            },
            _ => None,
        };

        if let Some(model_name) = referenced {
            fields.push(PopulatableField {
                path: path.to_string(),
                model_name: model_name.clone(),
            });
        }
    }

    fields
}
