//! Runtime data model definitions.
//!
//! Types in `model` are the static, derive-generated schema tables for
//! entities: which attributes exist, what they are called on the wire, what
//! type they carry, and which relationships lead to which related entity.
//!
//! In general:
//! - `#[derive(Entity)]` defines *what exists*
//! - `db::schema` indexes it for lookups
//! - `db::query` compiles descriptors against it
pub mod entity;
pub mod field;
pub mod relation;

pub use entity::EntityModel;
pub use field::{EnumModel, FieldKind, FieldModel, FieldType};
pub use relation::{Cardinality, RelationModel};
