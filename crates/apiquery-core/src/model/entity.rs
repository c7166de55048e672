use crate::model::{field::FieldModel, relation::RelationModel};

///
/// EntityModel
/// Macro-generated runtime model for one entity.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (registry key and diagnostics).
    pub path: &'static str,
    /// Stable external resource name.
    pub entity_name: &'static str,
    /// Internal name of the identifier attribute (an entry in `fields`).
    pub primary_key: &'static str,
    /// Ordered attribute list.
    pub fields: &'static [FieldModel],
    /// Ordered relationship list.
    pub relations: &'static [RelationModel],
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, public_name: &str) -> Option<&'static FieldModel> {
        self.fields
            .iter()
            .find(|field| field.public_name == public_name)
    }

    #[must_use]
    pub fn relation(&self, public_name: &str) -> Option<&'static RelationModel> {
        self.relations
            .iter()
            .find(|relation| relation.public_name == public_name)
    }

    #[must_use]
    pub fn primary_key_field(&self) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == self.primary_key)
    }
}
