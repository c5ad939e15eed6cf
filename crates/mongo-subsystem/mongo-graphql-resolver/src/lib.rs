// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub use registry::{Registry, RegistryMap};
pub use registry_error::RegistryError;
pub use resolve_info::ResolveInfo;

mod population_mapper;
mod projection_mapper;
mod registry;
mod registry_error;
mod resolve_info;

#[cfg(test)]
mod test_utils;

/// GraphQL's introspection meta field, never a storage field.
pub(crate) const TYPENAME_FIELD: &str = "__typename";
