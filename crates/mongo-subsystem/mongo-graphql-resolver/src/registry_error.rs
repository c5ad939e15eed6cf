// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use mongo_graphql_model::SchemaError;
use thiserror::Error;

/// Errors raised while mapping a selection set onto a projection or a
/// population plan. All of them are fatal for the current request; the calling
/// resolver decides how to surface them.
#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("Model \"{0}\" is not registered")]
    UnregisteredModel(String),

    #[error("Unknown fragment \"{0}\"")]
    UnknownFragment(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("No operation found")]
    NoOperationFound,

    #[error("Must provide operation name if query contains multiple operations")]
    AmbiguousOperation,

    #[error("Operation has no root field selection")]
    NoRootSelection,
}
