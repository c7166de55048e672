//! ## Crate layout
//! - `config`: TOML-backed compiler settings (separator, text case, page sizes).
//! - `db`: schema registry, predicates, descriptor compilation, and the query pipeline.
//! - `error`: client and internal query errors.
//! - `model`: static entity, attribute, and relationship metadata.
//! - `traits`: runtime traits implemented by `#[derive(Entity)]`.
//! - `value`: dynamic attribute values and their comparison rules.
//!
//! The `prelude` module carries everything a request handler needs to turn
//! parsed query parameters into a result set.

pub use apiquery_core::{config, db, error, model, traits, value};
pub use apiquery_derive::{Entity, EnumValue};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use apiquery_derive::{Entity, EnumValue};
    pub use apiquery_core::{
        config::QueryConfig,
        db::{
            query::{
                FieldSelection, FilterDescriptor, FilterOperation, PageRequest, Query,
                QueryCompiler, QueryDescriptors, SortDescriptor, SortDirection,
            },
            schema::Schema,
        },
        error::QueryError,
        traits::{Entity, EntitySchema},
        value::Value,
    };
}
