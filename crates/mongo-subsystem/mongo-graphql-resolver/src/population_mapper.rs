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

use mongo_graphql_model::{
    PopulateOptions, SchemaSource, always_selected_references, mandatory_select_paths,
};

use crate::TYPENAME_FIELD;
use crate::registry::RegistryMap;
use crate::registry_error::RegistryError;

/// Map selection nodes onto a population plan for `model_name`.
///
/// Two path cursors are threaded through the recursion: `root_tree` holds
/// storage coordinates from the true storage root and keys the plan entries;
/// `local_tree` holds coordinates from the nearest populated boundary and is
/// reset to empty each time a populatable field is crossed. A plan entry for a
/// given path is created at most once and subsequently looked up and extended.
pub(crate) fn map_population<S: SchemaSource>(
    selections: &[Positioned<Selection>],
    fragments: &HashMap<Name, Positioned<FragmentDefinition>>,
    model_name: &str,
    connection: &S,
    registry_map: &RegistryMap,
    population: &mut Vec<PopulateOptions>,
    root_tree: &[String],
    local_tree: &[String],
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

                let subselections = &field.node.selection_set.node.items;

                if !subselections.is_empty() {
                    let lookup = if local_tree.is_empty() {
                        name.to_string()
                    } else {
                        format!("{}.{}", root_tree.join("."), name)
                    };
                    let populatable =
                        populatable_fields.iter().find(|field| field.path == lookup);

                    let mut next_root = root_tree.to_vec();
                    next_root.push(if local_tree.is_empty() {
                        name.to_string()
                    } else {
                        format!("{}.{}", local_tree.join("."), name)
                    });

                    match populatable {
                        Some(reference) => {
                            // descend into the enclosing entry's sub-plan when
                            // that entry already exists
                            let enclosing = root_tree.last().and_then(|last| {
                                population.iter().position(|entry| entry.path == *last)
                            });
                            let target = match enclosing {
                                Some(index) => &mut population[index].populate,
                                None => &mut *population,
                            };

                            map_population(
                                subselections,
                                fragments,
                                &reference.model_name,
                                connection,
                                registry_map,
                                target,
                                &next_root,
                                &[],
                            )?;
                        }
                        None => {
                            let mut next_local = local_tree.to_vec();
                            next_local.push(name.to_string());

                            map_population(
                                subselections,
                                fragments,
                                model_name,
                                connection,
                                registry_map,
                                population,
                                &next_root,
                                &next_local,
                            )?;
                        }
                    }

                    continue;
                }

                // scalar leaf: outside any populated boundary it belongs to the
                // projection only
                if root_tree.is_empty() {
                    continue;
                }

                let dotted = if local_tree.is_empty() {
                    name.to_string()
                } else {
                    format!("{}.{}", local_tree.join("."), name)
                };

                // the owning entry sits at the nearest enclosing boundary
                let owner = root_tree
                    .len()
                    .checked_sub(local_tree.len() + 1)
                    .and_then(|depth| {
                        let boundary = root_tree[depth].as_str();
                        population.iter().position(|entry| entry.path == boundary)
                    });

                match owner {
                    Some(index) => {
                        let select = &mut population[index].select;
                        if !select.contains(&dotted) {
                            select.push(dotted);
                        }
                    }
                    None if local_tree.is_empty() => {
                        let schema = connection.schema(model_name)?;
                        let mut select = mandatory_select_paths(schema);
                        if !select.contains(&dotted) {
                            select.push(dotted);
                        }

                        if let Some(path) = root_tree.last() {
                            population.push(PopulateOptions {
                                path: path.clone(),
                                populate: mandatory_population(model_name, connection)?,
                                select,
                            });
                        }
                    }
                    None => {}
                }
            }
            Selection::InlineFragment(fragment) => {
                map_population(
                    &fragment.node.selection_set.node.items,
                    fragments,
                    model_name,
                    connection,
                    registry_map,
                    population,
                    root_tree,
                    local_tree,
                )?;
            }
            Selection::FragmentSpread(spread) => {
                let fragment = fragments.get(&spread.node.fragment_name.node).ok_or_else(|| {
                    RegistryError::UnknownFragment(spread.node.fragment_name.node.to_string())
                })?;

                map_population(
                    &fragment.node.selection_set.node.items,
                    fragments,
                    model_name,
                    connection,
                    registry_map,
                    population,
                    root_tree,
                    local_tree,
                )?;
            }
        }
    }

    Ok(())
}

/// The population entries the schema mandates whenever `model_name` is
/// populated: one entry per always-select reference field, carrying the
/// referenced model's own mandatory select paths. The query never has to ask
/// for these.
fn mandatory_population<S: SchemaSource>(
    model_name: &str,
    connection: &S,
) -> Result<Vec<PopulateOptions>, RegistryError> {
    let schema = connection.schema(model_name)?;

    always_selected_references(schema)
        .into_iter()
        .map(|reference| {
            let target = connection.schema(&reference.model_name)?;

            Ok(PopulateOptions {
                path: reference.path,
                populate: vec![],
                select: mandatory_select_paths(target),
            })
        })
        .collect()
}
