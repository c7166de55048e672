use crate::{db::query::CoercionError, model::Cardinality};
use std::fmt;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Compile-time failure raised while turning descriptors into a query
/// pipeline. Raised at the first invalid path or value; nothing is retried
/// because every variant is a deterministic function of its input.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("unknown attribute '{attribute}' on '{entity}'")]
    UnknownAttribute {
        entity: &'static str,
        attribute: String,
    },

    #[error("unknown relationship '{relationship}' on '{entity}'")]
    UnknownRelationship {
        entity: &'static str,
        relationship: String,
    },

    #[error(transparent)]
    TypeCoercion(#[from] CoercionError),

    #[error("operation '{op}' is not valid for attribute '{attribute}': {reason}")]
    InvalidOperationForAttribute {
        op: String,
        attribute: String,
        reason: String,
    },

    #[error("unsupported filter operation '{op}'")]
    UnsupportedFilterOperation { op: String },

    #[error("entity '{path}' is not registered in the schema")]
    UnregisteredEntity { path: &'static str },
}

impl QueryError {
    pub(crate) fn invalid_operation(
        op: impl fmt::Display,
        attribute: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOperationForAttribute {
            op: op.to_string(),
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn quantifier_requires_to_many(
        op: impl fmt::Display,
        attribute: &str,
        found: Option<Cardinality>,
    ) -> Self {
        let reason = match found {
            Some(cardinality) => {
                format!("quantified operations need a to-many relationship, found {cardinality}")
            }
            None => "quantified operations need a to-many relationship".to_string(),
        };

        Self::invalid_operation(op, attribute, reason)
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownAttribute { .. }
            | Self::UnknownRelationship { .. }
            | Self::TypeCoercion(_)
            | Self::InvalidOperationForAttribute { .. } => ErrorClass::Client,
            Self::UnsupportedFilterOperation { .. } | Self::UnregisteredEntity { .. } => {
                ErrorClass::Internal
            }
        }
    }

    /// HTTP status the boundary layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::Client => 400,
            ErrorClass::Internal => 500,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Client errors come from bad descriptors; internal errors signal a defect
/// or version skew between the descriptor producer and this compiler.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Client,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Client => "client",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}
