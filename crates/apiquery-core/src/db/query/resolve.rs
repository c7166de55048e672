use crate::{
    db::{
        predicate::MemberPath,
        schema::{AttributeMetadata, EntityInfo, RelationshipMetadata, Schema},
    },
    error::QueryError,
    model::{Cardinality, EntityModel},
};

///
/// ResolvedPath
///
/// A public member path bound to schema metadata. Built once per
/// descriptor; the builders branch on the variant instead of re-parsing
/// strings.
///

#[derive(Clone, Copy, Debug)]
pub enum ResolvedPath {
    Attribute(AttributeMetadata),
    ToOne {
        relationship: RelationshipMetadata,
        attribute: AttributeMetadata,
    },
    ToMany {
        relationship: RelationshipMetadata,
        attribute: AttributeMetadata,
    },
}

impl ResolvedPath {
    #[must_use]
    pub const fn attribute(&self) -> &AttributeMetadata {
        match self {
            Self::Attribute(attribute)
            | Self::ToOne { attribute, .. }
            | Self::ToMany { attribute, .. } => attribute,
        }
    }

    #[must_use]
    pub const fn relationship(&self) -> Option<&RelationshipMetadata> {
        match self {
            Self::Attribute(_) => None,
            Self::ToOne { relationship, .. } | Self::ToMany { relationship, .. } => {
                Some(relationship)
            }
        }
    }

    /// Member access for predicates. For a to-many path this is relative to
    /// one related element, since quantifiers bind the element.
    #[must_use]
    pub fn member_path(&self) -> MemberPath {
        match self {
            Self::Attribute(attribute) | Self::ToMany { attribute, .. } => {
                MemberPath::field(attribute.internal_name)
            }
            Self::ToOne {
                relationship,
                attribute,
            } => MemberPath::related(relationship.internal_name, attribute.internal_name),
        }
    }

    /// Public dotted form, for diagnostics.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.relationship() {
            Some(relationship) => format!(
                "{}.{}",
                relationship.public_name,
                self.attribute().public_name
            ),
            None => self.attribute().public_name.to_string(),
        }
    }
}

impl Schema {
    pub(crate) fn try_entity(
        &self,
        model: &'static EntityModel,
    ) -> Result<&EntityInfo, QueryError> {
        self.entity(model)
            .ok_or(QueryError::UnregisteredEntity { path: model.path })
    }

    /// Resolve a public member path on `model`.
    ///
    /// The relationship comes from `relationship` when given (a matching
    /// `relationship.` prefix on `path` is stripped), otherwise from the
    /// first segment of a dotted `path`.
    pub fn resolve(
        &self,
        model: &'static EntityModel,
        path: &str,
        relationship: Option<&str>,
    ) -> Result<ResolvedPath, QueryError> {
        let root = self.try_entity(model)?;

        let (relationship_name, attribute_name) = match relationship {
            Some(name) => (
                Some(name),
                path.strip_prefix(name)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .unwrap_or(path),
            ),
            None => match path.split_once('.') {
                Some((name, attribute)) => (Some(name), attribute),
                None => (None, path),
            },
        };

        let Some(relationship_name) = relationship_name else {
            let attribute = root.attribute(attribute_name).ok_or_else(|| {
                QueryError::UnknownAttribute {
                    entity: model.entity_name,
                    attribute: path.to_string(),
                }
            })?;

            return Ok(ResolvedPath::Attribute(*attribute));
        };

        let relationship = *self.resolve_relationship(model, relationship_name)?;
        let related = self.try_entity(relationship.related)?;
        let attribute = *related.attribute(attribute_name).ok_or_else(|| {
            QueryError::UnknownAttribute {
                entity: relationship.related.entity_name,
                attribute: attribute_name.to_string(),
            }
        })?;

        Ok(match relationship.cardinality {
            Cardinality::One => ResolvedPath::ToOne {
                relationship,
                attribute,
            },
            Cardinality::Many => ResolvedPath::ToMany {
                relationship,
                attribute,
            },
        })
    }

    /// Resolve a public relationship name on `model`.
    pub fn resolve_relationship(
        &self,
        model: &'static EntityModel,
        name: &str,
    ) -> Result<&RelationshipMetadata, QueryError> {
        self.try_entity(model)?
            .relationship(name)
            .ok_or_else(|| QueryError::UnknownRelationship {
                entity: model.entity_name,
                relationship: name.to_string(),
            })
    }
}
