//! Core runtime for apiquery: entity traits, values, the schema registry,
//! descriptor compilation, and the lazily-evaluated query pipeline.
#![warn(unreachable_pub)]

extern crate self as apiquery;

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the compiler entry point.
/// Errors and IR internals stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        config::QueryConfig,
        db::{
            query::{
                FieldSelection, FilterDescriptor, FilterOperation, Query, QueryCompiler,
                QueryDescriptors, SortDescriptor, SortDirection,
            },
            schema::Schema,
        },
        model::EntityModel,
        traits::{Entity, EntitySchema},
        value::Value,
    };
}
