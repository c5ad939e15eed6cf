use std::cell::RefCell;
use std::collections::HashMap;

use async_graphql_parser::parse_query;
use async_graphql_parser::types::ExecutableDocument;

use mongo_graphql_model::{
    ModelSchema, PathType, PopulateOptions, SchemaCatalog, SchemaError, SchemaSource, TYPE_KEY,
};

pub const SIMPLE: &str = "SimpleModel";
pub const PARENT: &str = "ParentModel";
pub const SELECTED_PARENT: &str = "SelectedParentModel";
pub const SELECTED_CHILD: &str = "SelectedChildModel";
pub const COMPLEX_PARENT: &str = "ComplexParentModel";
pub const CHILD: &str = "ChildModel";
pub const BAZ: &str = "BazModel";
pub const SELF_REF: &str = "SelfRefModel";

pub fn parse(query: &str) -> ExecutableDocument {
    parse_query(query).unwrap()
}

pub fn populate_options(
    path: &str,
    populate: Vec<PopulateOptions>,
    select: &[&str],
) -> PopulateOptions {
    PopulateOptions {
        path: path.to_string(),
        populate,
        select: select.iter().map(|s| s.to_string()).collect(),
    }
}

fn simple_schema() -> ModelSchema {
    ModelSchema::new()
        .path("foo", PathType::scalar())
        .path("bar", PathType::scalar())
}

pub fn simple_catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog.define(SIMPLE, simple_schema());
    catalog
}

/// A parent holding a plain reference to the simple model.
pub fn ref_catalog() -> SchemaCatalog {
    let mut catalog = simple_catalog();
    catalog.define(
        PARENT,
        ModelSchema::new().path("child", PathType::reference(SIMPLE)),
    );
    catalog
}

/// A parent referencing a discriminator child that carries an always-selected
/// scalar of its own.
pub fn selected_ref_catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog.define(
        SELECTED_CHILD,
        ModelSchema::new()
            .path("baz", PathType::scalar().always_select())
            .path("foo", PathType::scalar())
            .path("bar", PathType::scalar())
            .path(TYPE_KEY, PathType::scalar().always_select()),
    );
    catalog.define(
        SELECTED_PARENT,
        ModelSchema::new().path("child", PathType::reference(SELECTED_CHILD)),
    );
    catalog
}

/// The full fixture: a parent with an array of sub-documents mixing a
/// reference and a plain sub-object, plus an array of references; a
/// self-referencing child with always-selected scalars and references; a bare
/// side collection.
pub fn complex_catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog.define(
        COMPLEX_PARENT,
        ModelSchema::new()
            .path(
                "children",
                PathType::array(vec![PathType::document(vec![
                    ("child", PathType::reference(CHILD)),
                    ("baz", PathType::document(vec![("fiz", PathType::scalar())])),
                ])]),
            )
            .path("bazzes", PathType::array(vec![PathType::reference(BAZ)])),
    );
    catalog.define(
        CHILD,
        ModelSchema::new()
            .path("foo", PathType::scalar())
            .path("bar", PathType::scalar())
            .path("child", PathType::reference(CHILD))
            .path("doo", PathType::reference(CHILD).always_select())
            .path(
                "cuzzes",
                PathType::array(vec![PathType::scalar()]).always_select(),
            )
            .path(TYPE_KEY, PathType::scalar().always_select())
            .path(
                "bazzes",
                PathType::array(vec![PathType::reference(BAZ)]).always_select(),
            ),
    );
    catalog.define(BAZ, ModelSchema::new().path("fiz", PathType::scalar()));
    catalog
}

pub fn self_ref_catalog() -> SchemaCatalog {
    let mut catalog = SchemaCatalog::new();
    catalog.define(
        SELF_REF,
        ModelSchema::new()
            .path("foo", PathType::scalar())
            .path("bar", PathType::scalar())
            .path("self", PathType::reference(SELF_REF)),
    );
    catalog
}

/// Schema source wrapper counting lookups per model, to observe that
/// discovery never re-runs for a registered model.
pub struct CountingSource {
    catalog: SchemaCatalog,
    lookups: RefCell<HashMap<String, usize>>,
}

impl CountingSource {
    pub fn new(catalog: SchemaCatalog) -> Self {
        Self {
            catalog,
            lookups: RefCell::new(HashMap::new()),
        }
    }

    pub fn lookups(&self, model_name: &str) -> usize {
        self.lookups
            .borrow()
            .get(model_name)
            .copied()
            .unwrap_or_default()
    }
}

impl SchemaSource for CountingSource {
    fn schema(&self, model_name: &str) -> Result<&ModelSchema, SchemaError> {
        *self
            .lookups
            .borrow_mut()
            .entry(model_name.to_string())
            .or_insert(0) += 1;

        self.catalog.schema(model_name)
    }
}
