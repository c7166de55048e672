mod coercion;
mod compiler;
mod descriptor;
mod filter;
mod order;
mod page;
mod pipeline;
mod resolve;
mod select;

#[cfg(test)]
mod tests;

pub use coercion::{CoercionError, coerce_list, coerce_scalar};
pub use compiler::QueryCompiler;
pub use descriptor::{
    Arity, FieldSelection, FilterDescriptor, FilterOperation, PageRequest, QueryDescriptors,
    SortDescriptor, SortDirection,
};
pub use order::{OrderKey, OrderPlan};
pub use page::{PageWindow, page};
pub use pipeline::{Query, Stage};
pub use resolve::ResolvedPath;
pub use select::{FieldMask, Projection, RelationMask};
