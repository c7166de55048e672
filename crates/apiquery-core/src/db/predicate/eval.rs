use crate::{
    db::predicate::{CompareOp, MemberPath, Predicate, TextOp},
    traits::{Record, RelationRef},
    value::{Value, compare_eq, compare_order},
};
use std::cmp::Ordering;

///
/// MemberRead
///
/// Result of reading a member path from a record. An absent to-one
/// relation reads as `Null`; a path naming something the record does not
/// expose as a scalar reads as `Missing`.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MemberRead {
    Present(Value),
    Missing,
}

pub(crate) fn read_member<R: Record + ?Sized>(row: &R, path: &MemberPath) -> MemberRead {
    let value = match path {
        MemberPath::Field(field) => row.get_value(field),
        MemberPath::Related { relation, field } => match row.relation(relation) {
            Some(RelationRef::One(Some(related))) => related.get_value(field),
            Some(RelationRef::One(None)) => Some(Value::Null),
            Some(RelationRef::Many(_)) | None => None,
        },
    };

    value.map_or(MemberRead::Missing, MemberRead::Present)
}

// Evaluate a member predicate only when the member is readable.
fn on_present<R: Record + ?Sized>(
    row: &R,
    path: &MemberPath,
    f: impl FnOnce(&Value) -> bool,
) -> bool {
    match read_member(row, path) {
        MemberRead::Present(value) => f(&value),
        MemberRead::Missing => false,
    }
}

///
/// Evaluate a predicate against a single record.
///
/// Pure runtime evaluation: no schema access and no coercion. Comparisons
/// that are undefined (mismatched variants, null ordering) evaluate to
/// `false`, so `Not` of such a comparison is `true`.
///
#[must_use]
pub fn eval<R: Record + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,

        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Not(inner) => !eval(row, inner),

        Predicate::Compare { path, op, value } => {
            on_present(row, path, |actual| eval_compare(actual, *op, value))
        }

        Predicate::IsNull { path } => on_present(row, path, Value::is_null),

        Predicate::Text {
            path,
            op,
            value,
            mode,
        } => on_present(row, path, |actual| {
            let matched = match op {
                TextOp::Contains => actual.text_contains(value, *mode),
                TextOp::StartsWith => actual.text_starts_with(value, *mode),
                TextOp::EndsWith => actual.text_ends_with(value, *mode),
            };

            // NOTE: null or non-text members never match
            matched.unwrap_or(false)
        }),

        Predicate::InList { path, values } => on_present(row, path, |actual| {
            values
                .iter()
                .any(|candidate| compare_eq(actual, candidate) == Some(true))
        }),

        Predicate::Any {
            relation,
            predicate,
        } => match row.relation(relation) {
            Some(RelationRef::Many(items)) => items.iter().any(|item| eval(*item, predicate)),
            Some(RelationRef::One(Some(item))) => eval(item, predicate),
            Some(RelationRef::One(None)) | None => false,
        },

        Predicate::Every {
            relation,
            predicate,
        } => match row.relation(relation) {
            Some(RelationRef::Many(items)) => items.iter().all(|item| eval(*item, predicate)),
            Some(RelationRef::One(Some(item))) => eval(item, predicate),
            Some(RelationRef::One(None)) => true,
            None => false,
        },
    }
}

fn eval_compare(actual: &Value, op: CompareOp, expected: &Value) -> bool {
    match op {
        CompareOp::Eq => compare_eq(actual, expected) == Some(true),
        CompareOp::Ne => compare_eq(actual, expected) == Some(false),
        CompareOp::Lt => compare_order(actual, expected) == Some(Ordering::Less),
        CompareOp::Le => matches!(
            compare_order(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        CompareOp::Gt => compare_order(actual, expected) == Some(Ordering::Greater),
        CompareOp::Ge => matches!(
            compare_order(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
    }
}
