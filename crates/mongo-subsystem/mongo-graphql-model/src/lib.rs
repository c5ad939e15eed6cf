// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub use catalog::{SchemaCatalog, SchemaSource};
pub use populatable::{
    PopulatableField, always_selected_references, mandatory_select_paths, populatable_fields,
};
pub use populate_options::PopulateOptions;
pub use schema::{ID_FIELD, ModelSchema, PathKind, PathType, TYPE_KEY};
pub use schema_error::SchemaError;

mod catalog;
mod populatable;
mod populate_options;
mod schema;
mod schema_error;
