
use crate::{
    model::{Cardinality, EntityModel, FieldModel, FieldType, RelationModel},
    traits::EntitySchema,
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Raised while building the registry; a model that fails here is a
/// defect in the entity declaration, not in a request.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("entity '{entity}' declares attribute '{name}' more than once")]
    DuplicateAttribute {
        entity: &'static str,
        name: &'static str,
    },

    #[error("entity '{entity}' declares relationship '{name}' more than once")]
    DuplicateRelationship {
        entity: &'static str,
        name: &'static str,
    },

    #[error("entity '{entity}' uses '{name}' for both an attribute and a relationship")]
    AmbiguousMember {
        entity: &'static str,
        name: &'static str,
    },

    #[error("primary key '{field}' not present in attributes of '{entity}'")]
    InvalidPrimaryKey {
        entity: &'static str,
        field: &'static str,
    },

    #[error("primary key '{field}' of '{entity}' must not be nullable")]
    NullablePrimaryKey {
        entity: &'static str,
        field: &'static str,
    },
}

///
/// AttributeMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AttributeMetadata {
    pub public_name: &'static str,
    pub internal_name: &'static str,
    pub field_type: FieldType,
}

impl From<&'static FieldModel> for AttributeMetadata {
    fn from(field: &'static FieldModel) -> Self {
        Self {
            public_name: field.public_name,
            internal_name: field.name,
            field_type: field.field_type(),
        }
    }
}

///
/// RelationshipMetadata
///

#[derive(Clone, Copy, Debug)]
pub struct RelationshipMetadata {
    pub public_name: &'static str,
    pub internal_name: &'static str,
    pub related: &'static EntityModel,
    pub cardinality: Cardinality,
}

impl RelationshipMetadata {
    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        matches!(self.cardinality, Cardinality::Many)
    }
}

impl From<&'static RelationModel> for RelationshipMetadata {
    fn from(relation: &'static RelationModel) -> Self {
        Self {
            public_name: relation.public_name,
            internal_name: relation.name,
            related: relation.related(),
            cardinality: relation.cardinality,
        }
    }
}

///
/// EntityInfo
///
/// Validated per-entity index keyed by public member name.
///

#[derive(Clone, Debug)]
pub struct EntityInfo {
    model: &'static EntityModel,
    identifier: AttributeMetadata,
    attributes: BTreeMap<&'static str, AttributeMetadata>,
    relationships: BTreeMap<&'static str, RelationshipMetadata>,
}

impl EntityInfo {
    pub fn from_entity_model(model: &'static EntityModel) -> Result<Self, SchemaError> {
        let entity = model.entity_name;

        let mut attributes = BTreeMap::new();
        let mut internal = BTreeSet::new();
        for field in model.fields {
            if attributes.contains_key(field.public_name) || !internal.insert(field.name) {
                return Err(SchemaError::DuplicateAttribute {
                    entity,
                    name: field.public_name,
                });
            }
            attributes.insert(field.public_name, AttributeMetadata::from(field));
        }

        let mut relationships = BTreeMap::new();
        for relation in model.relations {
            if attributes.contains_key(relation.public_name) {
                return Err(SchemaError::AmbiguousMember {
                    entity,
                    name: relation.public_name,
                });
            }
            if relationships.contains_key(relation.public_name) || !internal.insert(relation.name)
            {
                return Err(SchemaError::DuplicateRelationship {
                    entity,
                    name: relation.public_name,
                });
            }
            relationships.insert(relation.public_name, RelationshipMetadata::from(relation));
        }

        let Some(pk) = model.primary_key_field() else {
            return Err(SchemaError::InvalidPrimaryKey {
                entity,
                field: model.primary_key,
            });
        };
        if pk.nullable {
            return Err(SchemaError::NullablePrimaryKey {
                entity,
                field: pk.name,
            });
        }

        Ok(Self {
            model,
            identifier: AttributeMetadata::from(pk),
            attributes,
            relationships,
        })
    }

    #[must_use]
    pub const fn model(&self) -> &'static EntityModel {
        self.model
    }

    #[must_use]
    pub const fn identifier(&self) -> &AttributeMetadata {
        &self.identifier
    }

    #[must_use]
    pub fn attribute(&self, public_name: &str) -> Option<&AttributeMetadata> {
        self.attributes.get(public_name)
    }

    #[must_use]
    pub fn relationship(&self, public_name: &str) -> Option<&RelationshipMetadata> {
        self.relationships.get(public_name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeMetadata> {
        self.attributes.values()
    }

    pub fn relationships(&self) -> impl Iterator<Item = &RelationshipMetadata> {
        self.relationships.values()
    }
}

///
/// Schema
///
/// Eagerly-built, immutable-after-construction registry of entity metadata,
/// keyed by model path. Registering an entity also registers every entity
/// reachable through its relationships.
///

#[derive(Clone, Debug, Default)]
pub struct Schema {
    entities: BTreeMap<&'static str, EntityInfo>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry rooted at `E`.
    pub fn for_entity<E: EntitySchema>() -> Result<Self, SchemaError> {
        let mut schema = Self::new();
        schema.register::<E>()?;

        Ok(schema)
    }

    pub fn register<E: EntitySchema>(&mut self) -> Result<&mut Self, SchemaError> {
        self.register_model(E::MODEL)
    }

    pub fn register_model(
        &mut self,
        model: &'static EntityModel,
    ) -> Result<&mut Self, SchemaError> {
        let mut pending = vec![model];

        while let Some(model) = pending.pop() {
            // model paths are type paths, so a seen path is the same entity
            if self.entities.contains_key(model.path) {
                continue;
            }

            let info = EntityInfo::from_entity_model(model)?;
            pending.extend(info.relationships().map(|relation| relation.related));
            self.entities.insert(model.path, info);
        }

        Ok(self)
    }

    #[must_use]
    pub fn entity(&self, model: &EntityModel) -> Option<&EntityInfo> {
        self.entities.get(model.path)
    }

    #[must_use]
    pub fn contains(&self, model: &EntityModel) -> bool {
        self.entities.contains_key(model.path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
