use crate::model::entity::EntityModel;
use std::fmt;

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    One,
    Many,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::One => "to-one",
            Self::Many => "to-many",
        };
        write!(f, "{label}")
    }
}

///
/// RelationModel
///
/// Relationship metadata. The related model is reached through a function
/// pointer so mutually-referencing entities do not form a const cycle.
///

#[derive(Clone, Copy, Debug)]
pub struct RelationModel {
    pub name: &'static str,
    pub public_name: &'static str,
    pub cardinality: Cardinality,
    pub target: fn() -> &'static EntityModel,
}

impl RelationModel {
    #[must_use]
    pub const fn new(
        name: &'static str,
        public_name: &'static str,
        cardinality: Cardinality,
        target: fn() -> &'static EntityModel,
    ) -> Self {
        Self {
            name,
            public_name,
            cardinality,
            target,
        }
    }

    #[must_use]
    pub fn related(&self) -> &'static EntityModel {
        (self.target)()
    }
}
