use crate::{
    db::{
        predicate::{MemberPath, MemberRead, read_member},
        query::{
            descriptor::{SortDescriptor, SortDirection},
            resolve::ResolvedPath,
        },
        schema::Schema,
    },
    error::QueryError,
    model::EntityModel,
    traits::Record,
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// OrderKey
///
/// One resolved sort key. Earlier keys dominate; later keys only break
/// ties left by the ones before them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderKey {
    pub path: MemberPath,
    pub direction: SortDirection,
}

///
/// OrderPlan
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderPlan {
    keys: Vec<OrderKey>,
}

impl OrderPlan {
    #[must_use]
    pub const fn new(keys: Vec<OrderKey>) -> Self {
        Self { keys }
    }

    #[must_use]
    pub fn keys(&self) -> &[OrderKey] {
        &self.keys
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Stable multi-key sort: rows tied on every key keep input order.
    pub fn apply<R: Record>(&self, rows: &mut [R]) {
        if self.keys.is_empty() {
            return;
        }

        rows.sort_by(|left, right| self.compare(left, right));
    }

    // Compare two records, returning the first non-equal key ordering.
    #[must_use]
    pub fn compare<R: Record + ?Sized>(&self, left: &R, right: &R) -> Ordering {
        for key in &self.keys {
            let ordering = canonical_cmp(
                &sort_value(left, &key.path),
                &sort_value(right, &key.path),
            );
            let ordering = apply_direction(ordering, key.direction);

            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

// Unreadable members sort with nulls, ahead of every present value.
fn sort_value<R: Record + ?Sized>(row: &R, path: &MemberPath) -> Value {
    match read_member(row, path) {
        MemberRead::Present(value) => value,
        MemberRead::Missing => Value::Null,
    }
}

const fn apply_direction(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

///
/// OrderBuilder
///

pub(crate) struct OrderBuilder<'a> {
    schema: &'a Schema,
    model: &'static EntityModel,
}

impl<'a> OrderBuilder<'a> {
    pub(crate) const fn new(schema: &'a Schema, model: &'static EntityModel) -> Self {
        Self { schema, model }
    }

    pub(crate) fn build(&self, sorts: &[SortDescriptor]) -> Result<OrderPlan, QueryError> {
        let mut keys = Vec::with_capacity(sorts.len());

        for sort in sorts {
            let resolved =
                self.schema
                    .resolve(self.model, &sort.attribute, sort.relationship.as_deref())?;

            if let ResolvedPath::ToMany { .. } = resolved {
                return Err(QueryError::invalid_operation(
                    "sort",
                    &resolved.display_name(),
                    "cannot sort by an attribute of a to-many relationship",
                ));
            }

            keys.push(OrderKey {
                path: resolved.member_path(),
                direction: sort.direction,
            });
        }

        tracing::debug!(
            entity = self.model.entity_name,
            keys = keys.len(),
            "compiled ordering"
        );

        Ok(OrderPlan::new(keys))
    }
}
