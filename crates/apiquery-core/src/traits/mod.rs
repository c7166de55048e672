#[cfg(test)]
mod tests;

use crate::{
    db::query::FieldMask,
    model::{EntityModel, FieldKind},
    value::{Value, ValueEnum},
};
use chrono::{DateTime, NaiveDate, Utc};
use ulid::Ulid;

// ============================================================================
// ENTITY IDENTITY & SCHEMA
// ============================================================================
//
// These traits describe *what an entity is*. They are implemented by
// `#[derive(Entity)]`; hand-written impls must keep the model and the
// accessors in agreement.
//

///
/// EntitySchema
///
/// Declared schema facts for an entity.
///

pub trait EntitySchema {
    const MODEL: &'static EntityModel;

    /// Function-pointer friendly accessor, used by relationship metadata.
    #[must_use]
    fn model() -> &'static EntityModel
    where
        Self: Sized,
    {
        Self::MODEL
    }
}

///
/// Entity
///
/// Fully-described entity that query pipelines can filter, order, and shape.
///

pub trait Entity: EntitySchema + Record + Clone + Default + 'static {
    /// Build a new instance holding only the attributes and relationships
    /// named by `mask`; everything else keeps its `Default` value.
    #[must_use]
    fn shape(&self, mask: &FieldMask) -> Self;
}

// ============================================================================
// ENTITY VALUES
// ============================================================================
//
// These traits describe *instances*. `Record` is object safe so predicates
// can walk into related entities whose concrete type the root does not name.
//

///
/// FieldValues
///
/// Attribute access by internal (Rust) field name.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// Record
///

pub trait Record: FieldValues {
    fn entity_model(&self) -> &'static EntityModel;

    /// Relationship access by internal (Rust) field name.
    fn relation(&self, name: &str) -> Option<RelationRef<'_>>;
}

///
/// RelationRef
/// Borrowed view over one relationship of a record.
///

pub enum RelationRef<'a> {
    One(Option<&'a dyn Record>),
    Many(Vec<&'a dyn Record>),
}

///
/// ToOne
///
/// Field types that can hold a to-one relationship.
///

pub trait ToOne {
    type Target: Entity;

    fn target(&self) -> Option<&Self::Target>;

    fn from_target(target: Option<Self::Target>) -> Self;
}

impl<T: Entity> ToOne for Option<T> {
    type Target = T;

    fn target(&self) -> Option<&T> {
        self.as_ref()
    }

    fn from_target(target: Option<T>) -> Self {
        target
    }
}

///
/// ToMany
///
/// Field types that can hold a to-many relationship.
///

pub trait ToMany {
    type Target: Entity;

    fn targets(&self) -> Vec<&Self::Target>;

    fn from_targets(targets: Vec<Self::Target>) -> Self;
}

impl<T: Entity> ToMany for Vec<T> {
    type Target = T;

    fn targets(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn from_targets(targets: Vec<T>) -> Self {
        targets
    }
}

// ============================================================================
// QUERY VALUE BOUNDARIES
// ============================================================================

///
/// FieldValue
///
/// Conversion boundary for attribute types. The associated constants feed
/// the static `EntityModel` generated by the derive.
///

pub trait FieldValue {
    const KIND: FieldKind;
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: FieldKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

///
/// EnumValue
///
/// Implemented by `#[derive(EnumValue)]` for fieldless enums.
///

pub trait EnumValue {
    fn to_value_enum(&self) -> ValueEnum;
}

// impl_field_value
macro_rules! impl_field_value {
    ( $( $type:ty => $kind:ident, $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                const KIND: FieldKind = FieldKind::$kind;

                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }
            }
        )*
    };
}

impl_field_value!(
    bool => Bool, Bool,
    i8 => Int8, Int,
    i16 => Int16, Int,
    i32 => Int32, Int,
    i64 => Int64, Int,
    u8 => Uint8, Uint,
    u16 => Uint16, Uint,
    u32 => Uint32, Uint,
    u64 => Uint64, Uint,
    f32 => Float32, Float,
    f64 => Float64, Float,
    NaiveDate => Date, Date,
    DateTime<Utc> => Timestamp, Timestamp,
    Ulid => Ulid, Ulid,
);
