mod coercion;
mod filter;
mod resolve;

use crate::{
    db::query::{FilterDescriptor, FilterOperation, QueryCompiler},
    test_fixtures::Article,
};

fn compiler() -> QueryCompiler {
    QueryCompiler::for_entity::<Article>().expect("article schema should build")
}

fn filter(attribute: &str, operation: FilterOperation, value: &str) -> FilterDescriptor {
    FilterDescriptor::new(attribute, operation, value)
}
