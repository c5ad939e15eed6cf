// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;

use crate::schema::ModelSchema;
use crate::schema_error::SchemaError;

/// Capability to resolve a model name to its storage schema.
///
/// The projection/population core depends only on this interface, so any
/// driver or ORM layer that can enumerate its schema paths can back it.
pub trait SchemaSource {
    fn schema(&self, model_name: &str) -> Result<&ModelSchema, SchemaError>;
}

impl<S: SchemaSource + ?Sized> SchemaSource for &S {
    fn schema(&self, model_name: &str) -> Result<&ModelSchema, SchemaError> {
        (**self).schema(model_name)
    }
}

/// In-process model catalog: model name to schema, in definition order.
///
/// Stands in for a driver connection's model registry.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    models: IndexMap<String, ModelSchema>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a model. Redefining a name replaces the earlier schema.
    pub fn define(&mut self, model_name: impl Into<String>, schema: ModelSchema) {
        self.models.insert(model_name.into(), schema);
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

impl SchemaSource for SchemaCatalog {
    fn schema(&self, model_name: &str) -> Result<&ModelSchema, SchemaError> {
        self.models
            .get(model_name)
            .ok_or_else(|| SchemaError::UndefinedModel(model_name.to_string()))
    }
}
