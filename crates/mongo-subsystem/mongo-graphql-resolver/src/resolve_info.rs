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
use async_graphql_parser::types::{
    DocumentOperations, ExecutableDocument, FragmentDefinition, OperationDefinition, Selection,
    SelectionSet,
};
use async_graphql_value::Name;

use crate::registry_error::RegistryError;

/// The per-request slice of a GraphQL query the registry consumes: the
/// operation's selection set plus the document's fragment table.
#[derive(Clone, Copy)]
pub struct ResolveInfo<'a> {
    pub operation: &'a Positioned<OperationDefinition>,
    pub fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
}

impl<'a> ResolveInfo<'a> {
    pub fn new(
        operation: &'a Positioned<OperationDefinition>,
        fragments: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self {
            operation,
            fragments,
        }
    }

    /// Build resolve info from a parsed document containing a single
    /// operation.
    pub fn from_document(document: &'a ExecutableDocument) -> Result<Self, RegistryError> {
        let operation = match &document.operations {
            DocumentOperations::Single(operation) => operation,
            DocumentOperations::Multiple(operations) => {
                let mut operations = operations.values();
                match (operations.next(), operations.next()) {
                    (Some(operation), None) => operation,
                    (None, _) => return Err(RegistryError::NoOperationFound),
                    (Some(_), Some(_)) => return Err(RegistryError::AmbiguousOperation),
                }
            }
        };

        Ok(Self::new(operation, &document.fragments))
    }

    /// The effective root selections: the sub-selections of the operation's
    /// first field, offset by `root` when given.
    ///
    /// An offset segment that doesn't match a field of the selection reached
    /// so far falls back to that selection unmodified, without raising.
    pub(crate) fn root_selections(
        &self,
        root: Option<&str>,
    ) -> Result<&'a [Positioned<Selection>], RegistryError> {
        let top_level = &self.operation.node.selection_set.node.items;

        let root_field = match top_level.first().map(|selection| &selection.node) {
            Some(Selection::Field(field)) => field,
            _ => return Err(RegistryError::NoRootSelection),
        };

        let selection_set = &root_field.node.selection_set.node;
        if selection_set.items.is_empty() {
            return Err(RegistryError::NoRootSelection);
        }

        let paths: Vec<&str> = match root.filter(|root| !root.is_empty()) {
            Some(root) => root.split('.').collect(),
            None => vec![],
        };

        Ok(offset_selections(selection_set, &paths))
    }
}

fn offset_selections<'a>(
    selection_set: &'a SelectionSet,
    paths: &[&str],
) -> &'a [Positioned<Selection>] {
    let selections = &selection_set.items;

    let Some((segment, rest)) = paths.split_first() else {
        return selections;
    };

    let field = selections.iter().find_map(|selection| match &selection.node {
        Selection::Field(field) if field.node.name.node.as_str() == *segment => Some(field),
        _ => None,
    });

    match field {
        Some(field) if !field.node.selection_set.node.items.is_empty() => {
            offset_selections(&field.node.selection_set.node, rest)
        }
        _ => selections,
    }
}
