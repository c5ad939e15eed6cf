// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, instrument};

use mongo_graphql_model::{PopulatableField, PopulateOptions, SchemaSource, populatable_fields};

use crate::population_mapper::map_population;
use crate::projection_mapper::map_projection;
use crate::registry_error::RegistryError;
use crate::resolve_info::ResolveInfo;

/// Model name to populatable fields, in registration order.
pub type RegistryMap = IndexMap<String, Vec<PopulatableField>>;

/// Derives storage projections and population plans from a GraphQL query's
/// selection set, caching per-model reference metadata across calls.
///
/// Models are registered lazily and transitively on first use: registering a
/// model discovers its populatable fields once and then registers every model
/// they reference. Self- and mutually-referencing models terminate because a
/// registered name is never discovered again.
///
/// Registration mutates the cache, so calls take `&mut self`; a registry
/// shared across threads needs external locking.
pub struct Registry<S: SchemaSource> {
    connection: S,
    registry_map: RegistryMap,
}

impl<S: SchemaSource> Registry<S> {
    pub fn new(connection: S) -> Self {
        Self {
            connection,
            registry_map: RegistryMap::default(),
        }
    }

    pub fn registry_map(&self) -> &RegistryMap {
        &self.registry_map
    }

    /// The space-joined storage field paths to fetch for `model_name`, derived
    /// from the query's selection set.
    ///
    /// `root` offsets the walk to a nested selection when the resolver's field
    /// is wrapped in a container that has no storage counterpart.
    #[instrument(name = "Registry::project", skip(self, info))]
    pub fn project(
        &mut self,
        info: &ResolveInfo<'_>,
        model_name: &str,
        root: Option<&str>,
    ) -> Result<String, RegistryError> {
        let selections = info.root_selections(root)?;
        self.register(model_name)?;

        let mut paths = Vec::new();
        map_projection(
            selections,
            info.fragments,
            model_name,
            &self.registry_map,
            &[],
            &mut paths,
        )?;

        Ok(paths.join(" "))
    }

    /// The population plan for `model_name`: which referenced collections to
    /// join, recursively, each with its own select list and sub-plan.
    #[instrument(name = "Registry::populate", skip(self, info))]
    pub fn populate(
        &mut self,
        info: &ResolveInfo<'_>,
        model_name: &str,
        root: Option<&str>,
    ) -> Result<Vec<PopulateOptions>, RegistryError> {
        let selections = info.root_selections(root)?;
        self.register(model_name)?;

        let mut population = Vec::new();
        map_population(
            selections,
            info.fragments,
            model_name,
            &self.connection,
            &self.registry_map,
            &mut population,
            &[],
            &[],
        )?;

        Ok(population)
    }

    fn register(&mut self, model_name: &str) -> Result<(), RegistryError> {
        if self.registry_map.contains_key(model_name) {
            return Ok(());
        }

        let fields = populatable_fields(self.connection.schema(model_name)?);
        debug!(model_name, populatable = fields.len(), "registering model");

        let referenced: IndexSet<String> = fields
            .iter()
            .map(|field| field.model_name.clone())
            .collect();
        self.registry_map.insert(model_name.to_string(), fields);

        for next_model_name in referenced {
            if !self.registry_map.contains_key(&next_model_name) {
                self.register(&next_model_name)?;
            }
        }

        Ok(())
    }
}
