use crate::value::Value;
use std::{cmp::Ordering, mem::discriminant};

///
/// Value comparison semantics
///
/// Literals are coerced to the attribute's declared type before they reach
/// evaluation, so comparisons are strict: both sides must carry the same
/// variant. `Null` only equals `Null` and never orders.
///

/// Equality under strict variant matching.
///
/// Returns `None` when the two values carry different variants.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    if left.is_null() || right.is_null() {
        return Some(left.is_null() && right.is_null());
    }

    same_variant(left, right).then(|| left == right)
}

/// Ordering under strict variant matching.
///
/// Returns `None` when either side is null, the variants differ, or the
/// variant is not orderable.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    if left.is_null() || right.is_null() || !same_variant(left, right) {
        return None;
    }

    strict_ordering(left, right)
}

/// Canonical total ordering used by ORDER BY.
///
/// Values order by variant rank first (so `Null` sorts before every present
/// value), then within the rank. Floats use IEEE total ordering, which places
/// NaN after every other float and keeps the comparator total.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    canonical_rank(left)
        .cmp(&canonical_rank(right))
        .then_with(|| canonical_cmp_same_rank(left, right))
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        _ => strict_ordering(left, right).unwrap_or(Ordering::Equal),
    }
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Date(_) => 2,
        Value::Enum(_) => 3,
        Value::Float(_) => 4,
        Value::Int(_) => 5,
        Value::Text(_) => 6,
        Value::Timestamp(_) => 7,
        Value::Uint(_) => 8,
        Value::Ulid(_) => 9,
    }
}

fn same_variant(left: &Value, right: &Value) -> bool {
    discriminant(left) == discriminant(right)
}

fn strict_ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.ordinal.cmp(&b.ordinal)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Ulid(a), Value::Ulid(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

