// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::Positioned;
use async_graphql_parser::types::{FragmentDefinition, Selection};
use async_graphql_value::Name;

use crate::TYPENAME_FIELD;
use crate::registry::RegistryMap;
use crate::registry_error::RegistryError;

/// Map selection nodes onto the storage paths to fetch for `model_name`.
///
/// A field that is populatable at the current path contributes its dotted path
/// and is not descended into (its sub-fields belong to the population plan); a
/// non-populatable field with sub-selections is a plain nested sub-object and
/// is flattened with dot notation. Inline fragments and fragment spreads are
/// transparent to path resolution. Repeated requests for the same field are
/// kept as-is.
pub(crate) fn map_projection(
    selections: &[Positioned<Selection>],
    fragments: &HashMap<Name, Positioned<FragmentDefinition>>,
    model_name: &str,
    registry_map: &RegistryMap,
    tree: &[String],
    paths: &mut Vec<String>,
) -> Result<(), RegistryError> {
    for selection in selections {
        match &selection.node {
            Selection::Field(field) => {
                let name = field.node.name.node.as_str();
                if name == TYPENAME_FIELD {
                    continue;
                }

                let populatable_fields = registry_map
                    .get(model_name)
                    .ok_or_else(|| RegistryError::UnregisteredModel(model_name.to_string()))?;

                let dotted = if tree.is_empty() {
                    name.to_string()
                } else {
                    format!("{}.{}", tree.join("."), name)
                };

                let subselections = &field.node.selection_set.node.items;

                if subselections.is_empty()
                    || populatable_fields.iter().any(|field| field.path == dotted)
                {
                    paths.push(dotted);
                } else {
                    let mut subtree = tree.to_vec();
                    subtree.push(name.to_string());

                    map_projection(
                        subselections,
                        fragments,
                        model_name,
                        registry_map,
                        &subtree,
                        paths,
                    )?;
                }
            }
            Selection::InlineFragment(fragment) => {
                map_projection(
                    &fragment.node.selection_set.node.items,
                    fragments,
                    model_name,
                    registry_map,
                    tree,
                    paths,
                )?;
            }
            Selection::FragmentSpread(spread) => {
                let fragment = fragments.get(&spread.node.fragment_name.node).ok_or_else(|| {
                    RegistryError::UnknownFragment(spread.node.fragment_name.node.to_string())
                })?;

                map_projection(
                    &fragment.node.selection_set.node.items,
                    fragments,
                    model_name,
                    registry_map,
                    tree,
                    paths,
                )?;
            }
        }
    }

    Ok(())
}
