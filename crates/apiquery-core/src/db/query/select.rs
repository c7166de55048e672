use crate::{
    db::{
        query::{descriptor::FieldSelection, resolve::ResolvedPath},
        schema::Schema,
    },
    error::QueryError,
    model::EntityModel,
    traits::Entity,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    marker::PhantomData,
};

///
/// FieldMask
///
/// Internal names of the members a shaped entity keeps. The generated
/// `Entity::shape` consults it member by member.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldMask {
    fields: BTreeSet<&'static str>,
    relations: BTreeMap<&'static str, RelationMask>,
}

///
/// RelationMask
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RelationMask {
    /// Copy the related object(s) unchanged.
    Full,
    /// Shape the related object(s) with a nested mask.
    Fields(FieldMask),
}

impl FieldMask {
    /// Mask selecting only the identifier attribute.
    #[must_use]
    pub fn identifier(name: &'static str) -> Self {
        let mut mask = Self::default();
        mask.fields.insert(name);

        mask
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&RelationMask> {
        self.relations.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }

    pub fn relations(&self) -> impl Iterator<Item = (&'static str, &RelationMask)> {
        self.relations.iter().map(|(name, mask)| (*name, mask))
    }

    pub fn insert_field(&mut self, name: &'static str) {
        self.fields.insert(name);
    }

    /// Select a relationship in full; a full selection absorbs any
    /// attribute-level selection of the same relationship.
    pub fn insert_relation_full(&mut self, name: &'static str) {
        self.relations.insert(name, RelationMask::Full);
    }

    /// Select one attribute of a related type, seeding the nested mask with
    /// the related identifier.
    pub fn insert_related_field(
        &mut self,
        relation: &'static str,
        related_identifier: &'static str,
        field: &'static str,
    ) {
        let nested = self
            .relations
            .entry(relation)
            .or_insert_with(|| RelationMask::Fields(Self::identifier(related_identifier)));

        if let RelationMask::Fields(mask) = nested {
            mask.insert_field(field);
        }
    }
}

///
/// Projection
///
/// Compiled sparse-fieldset projection for entity type `E`. Applying it
/// never mutates the source element.
///

pub struct Projection<E> {
    mask: FieldMask,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity> Projection<E> {
    #[must_use]
    pub const fn new(mask: FieldMask) -> Self {
        Self {
            mask,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn mask(&self) -> &FieldMask {
        &self.mask
    }

    #[must_use]
    pub fn apply(&self, entity: &E) -> E {
        entity.shape(&self.mask)
    }
}

impl<E> Clone for Projection<E> {
    fn clone(&self) -> Self {
        Self {
            mask: self.mask.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Projection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projection")
            .field("mask", &self.mask)
            .finish()
    }
}

impl<E> PartialEq for Projection<E> {
    fn eq(&self, other: &Self) -> bool {
        self.mask == other.mask
    }
}

///
/// SelectBuilder
///

pub(crate) struct SelectBuilder<'a> {
    schema: &'a Schema,
    model: &'static EntityModel,
}

impl<'a> SelectBuilder<'a> {
    pub(crate) const fn new(schema: &'a Schema, model: &'static EntityModel) -> Self {
        Self { schema, model }
    }

    pub(crate) fn build(&self, selection: &FieldSelection) -> Result<FieldMask, QueryError> {
        let root = self.schema.try_entity(self.model)?;
        let mut mask = FieldMask::identifier(root.identifier().internal_name);

        for path in selection.paths() {
            // a bare relationship name selects the related object(s) whole
            if root.attribute(path).is_none()
                && let Some(relationship) = root.relationship(path)
            {
                mask.insert_relation_full(relationship.internal_name);
                continue;
            }

            match self.schema.resolve(self.model, path, None)? {
                ResolvedPath::Attribute(attribute) => mask.insert_field(attribute.internal_name),
                ResolvedPath::ToOne {
                    relationship,
                    attribute,
                }
                | ResolvedPath::ToMany {
                    relationship,
                    attribute,
                } => {
                    let related = self.schema.try_entity(relationship.related)?;
                    mask.insert_related_field(
                        relationship.internal_name,
                        related.identifier().internal_name,
                        attribute.internal_name,
                    );
                }
            }
        }

        tracing::debug!(
            entity = self.model.entity_name,
            paths = selection.paths().len(),
            "compiled projection"
        );

        Ok(mask)
    }
}
