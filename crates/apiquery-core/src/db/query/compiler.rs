use crate::{
    config::QueryConfig,
    db::{
        predicate::Predicate,
        query::{
            descriptor::{
                FieldSelection, FilterDescriptor, PageRequest, QueryDescriptors, SortDescriptor,
            },
            filter::FilterBuilder,
            order::{OrderBuilder, OrderPlan},
            page::PageWindow,
            pipeline::Query,
            resolve::ResolvedPath,
            select::{Projection, SelectBuilder},
        },
        schema::{Schema, SchemaError},
    },
    error::QueryError,
    traits::{Entity, EntitySchema},
};

///
/// QueryCompiler
///
/// Binds a schema registry and configuration, and compiles request
/// descriptors against them. Compilation is pure: the same descriptors
/// always yield the same result or the same error, and the first invalid
/// descriptor aborts the whole compilation.
///

#[derive(Clone, Debug)]
pub struct QueryCompiler {
    schema: Schema,
    config: QueryConfig,
}

impl QueryCompiler {
    #[must_use]
    pub const fn new(schema: Schema, config: QueryConfig) -> Self {
        Self { schema, config }
    }

    /// Compiler over a registry rooted at `E`, with default configuration.
    pub fn for_entity<E: EntitySchema>() -> Result<Self, SchemaError> {
        Ok(Self::new(Schema::for_entity::<E>()?, QueryConfig::default()))
    }

    #[must_use]
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn resolve<E: EntitySchema>(
        &self,
        path: &str,
        relationship: Option<&str>,
    ) -> Result<ResolvedPath, QueryError> {
        self.schema.resolve(E::MODEL, path, relationship)
    }

    pub fn filter<E: EntitySchema>(
        &self,
        filter: &FilterDescriptor,
    ) -> Result<Predicate, QueryError> {
        FilterBuilder::new(&self.schema, &self.config, E::MODEL).build(filter)
    }

    /// Logical AND of every filter, in list order.
    pub fn filters<E: EntitySchema>(
        &self,
        filters: &[FilterDescriptor],
    ) -> Result<Predicate, QueryError> {
        FilterBuilder::new(&self.schema, &self.config, E::MODEL).build_all(filters)
    }

    pub fn ordering<E: EntitySchema>(
        &self,
        sorts: &[SortDescriptor],
    ) -> Result<OrderPlan, QueryError> {
        OrderBuilder::new(&self.schema, E::MODEL).build(sorts)
    }

    pub fn projection<E: Entity>(
        &self,
        selection: &FieldSelection,
    ) -> Result<Projection<E>, QueryError> {
        let mask = SelectBuilder::new(&self.schema, E::MODEL).build(selection)?;

        Ok(Projection::new(mask))
    }

    /// Page window for `request`, after applying the configured default
    /// and maximum page sizes.
    #[must_use]
    pub fn window(&self, request: &PageRequest) -> PageWindow {
        PageWindow::new(
            self.config.effective_page_size(request.size),
            request.number,
        )
    }

    /// Apply every descriptor to `query` in the order filter, sort,
    /// select, page. The returned query has not been evaluated.
    pub fn compile<'a, E: Entity>(
        &self,
        query: Query<'a, E>,
        descriptors: &QueryDescriptors,
    ) -> Result<Query<'a, E>, QueryError> {
        let filters = FilterBuilder::new(&self.schema, &self.config, E::MODEL);
        let mut query = query;

        for filter in &descriptors.filters {
            query = query.filter(filters.build(filter)?);
        }

        query = query.order(self.ordering::<E>(&descriptors.sorts)?);

        if let Some(selection) = &descriptors.selection {
            query = query.project(self.projection::<E>(selection)?);
        }

        Ok(query.window(self.window(&descriptors.page)))
    }
}
