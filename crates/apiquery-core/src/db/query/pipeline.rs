use crate::{
    db::{
        predicate::{Predicate, eval},
        query::{order::OrderPlan, page::PageWindow, select::Projection},
    },
    traits::Entity,
};
use std::fmt;

///
/// Stage
///
/// One composed operation of a query, in application order. External
/// engines read the stages to push work down; `Query::execute` evaluates
/// them in memory.
///

pub enum Stage<E> {
    Filter(Predicate),
    Order(OrderPlan),
    Project(Projection<E>),
    Page(PageWindow),
}

impl<E> fmt::Debug for Stage<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(predicate) => f.debug_tuple("Filter").field(predicate).finish(),
            Self::Order(plan) => f.debug_tuple("Order").field(plan).finish(),
            Self::Project(projection) => f.debug_tuple("Project").field(projection).finish(),
            Self::Page(window) => f.debug_tuple("Page").field(window).finish(),
        }
    }
}

///
/// Query
///
/// Lazily-evaluated collection over `E`. Composing stages never touches
/// the source; nothing is read until the query is iterated.
///

pub struct Query<'a, E> {
    source: Box<dyn Iterator<Item = E> + 'a>,
    stages: Vec<Stage<E>>,
}

impl<'a, E: Entity> Query<'a, E> {
    #[must_use]
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = E>,
        I::IntoIter: 'a,
    {
        Self {
            source: Box::new(source.into_iter()),
            stages: Vec::new(),
        }
    }

    /// Keep elements satisfying `predicate`; successive filters conjoin.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.stages.push(Stage::Filter(predicate));
        self
    }

    #[must_use]
    pub fn order(mut self, plan: OrderPlan) -> Self {
        if !plan.is_empty() {
            self.stages.push(Stage::Order(plan));
        }
        self
    }

    #[must_use]
    pub fn project(mut self, projection: Projection<E>) -> Self {
        self.stages.push(Stage::Project(projection));
        self
    }

    #[must_use]
    pub fn window(mut self, window: PageWindow) -> Self {
        if !window.is_unbounded() {
            self.stages.push(Stage::Page(window));
        }
        self
    }

    /// Window to page `number` of `size` elements; `size <= 0` is a no-op.
    #[must_use]
    pub fn page(self, size: i64, number: i64) -> Self {
        self.window(PageWindow::new(size, number))
    }

    #[must_use]
    pub fn stages(&self) -> &[Stage<E>] {
        &self.stages
    }

    /// Evaluate every stage and collect the result.
    #[must_use]
    pub fn execute(self) -> Vec<E> {
        let rows: Vec<E> = self.into_iter().collect();
        tracing::trace!(
            entity = E::MODEL.entity_name,
            rows = rows.len(),
            "executed query"
        );

        rows
    }
}

impl<'a, E: Entity> IntoIterator for Query<'a, E> {
    type Item = E;
    type IntoIter = Box<dyn Iterator<Item = E> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        tracing::trace!(
            entity = E::MODEL.entity_name,
            stages = self.stages.len(),
            "evaluating query"
        );

        let mut rows = self.source;
        for stage in self.stages {
            let next: Box<dyn Iterator<Item = E> + 'a> = match stage {
                Stage::Filter(predicate) => Box::new(rows.filter(move |row| eval(row, &predicate))),
                Stage::Order(plan) => {
                    let mut buffered: Vec<E> = rows.collect();
                    plan.apply(&mut buffered);
                    Box::new(buffered.into_iter())
                }
                Stage::Project(projection) => Box::new(rows.map(move |row| projection.apply(&row))),
                Stage::Page(window) => Box::new(window.apply(rows)),
            };
            rows = next;
        }

        rows
    }
}

impl<E> fmt::Debug for Query<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}
