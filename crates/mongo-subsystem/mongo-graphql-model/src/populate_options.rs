// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Serialize;

/// One entry of a population plan: populate the documents referenced at
/// `path`, fetching `select` on them and recursively populating `populate`.
///
/// Serializes to the shape a driver's population primitive consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulateOptions {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub populate: Vec<PopulateOptions>,
    /// Deduplicated, in selection order. The referenced model's identity field
    /// and always-select paths lead the list.
    pub select: Vec<String>,
}
