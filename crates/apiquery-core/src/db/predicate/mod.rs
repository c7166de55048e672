mod eval;

#[cfg(test)]
mod tests;

use crate::value::{TextMode, Value};
use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
};

pub use eval::eval;
pub(crate) use eval::{MemberRead, read_member};

///
/// Predicate IR
///
/// Schema-resolved representation of a compiled filter. Member names are
/// internal (Rust) names; literals are already coerced to the attribute's
/// declared type. Evaluation lives in `eval`; external engines can walk
/// the tree directly for push-down.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        };
        write!(f, "{symbol}")
    }
}

///
/// TextOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextOp {
    Contains,
    StartsWith,
    EndsWith,
}

///
/// MemberPath
///
/// Attribute access on the element under evaluation: either directly, or
/// through one to-one relationship.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MemberPath {
    Field(String),
    Related { relation: String, field: String },
}

impl MemberPath {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub fn related(relation: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Related {
            relation: relation.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field}"),
            Self::Related { relation, field } => write!(f, "{relation}.{field}"),
        }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare {
        path: MemberPath,
        op: CompareOp,
        value: Value,
    },
    IsNull {
        path: MemberPath,
    },
    Text {
        path: MemberPath,
        op: TextOp,
        value: Value,
        mode: TextMode,
    },
    InList {
        path: MemberPath,
        values: Vec<Value>,
    },
    /// Some element of the to-many `relation` satisfies `predicate`.
    Any {
        relation: String,
        predicate: Box<Self>,
    },
    /// Every element of the to-many `relation` satisfies `predicate`.
    Every {
        relation: String,
        predicate: Box<Self>,
    },
}

impl Predicate {
    #[must_use]
    pub const fn compare(path: MemberPath, op: CompareOp, value: Value) -> Self {
        Self::Compare { path, op, value }
    }

    #[must_use]
    pub const fn null(path: MemberPath) -> Self {
        Self::IsNull { path }
    }

    #[must_use]
    pub const fn text(path: MemberPath, op: TextOp, value: Value, mode: TextMode) -> Self {
        Self::Text {
            path,
            op,
            value,
            mode,
        }
    }

    #[must_use]
    pub const fn in_list(path: MemberPath, values: Vec<Value>) -> Self {
        Self::InList { path, values }
    }

    #[must_use]
    pub fn any(relation: impl Into<String>, predicate: Self) -> Self {
        Self::Any {
            relation: relation.into(),
            predicate: Box::new(predicate),
        }
    }

    #[must_use]
    pub fn every(relation: impl Into<String>, predicate: Self) -> Self {
        Self::Every {
            relation: relation.into(),
            predicate: Box::new(predicate),
        }
    }

    #[must_use]
    pub fn and(children: Vec<Self>) -> Self {
        Self::And(children)
    }

    #[must_use]
    pub fn or(children: Vec<Self>) -> Self {
        Self::Or(children)
    }

    /// Conjunction of `predicates`, flattening nested `And` nodes and
    /// collapsing the trivial cases.
    #[must_use]
    pub fn all_of(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut children = Vec::new();
        for predicate in predicates {
            match predicate {
                Self::True => {}
                Self::And(nested) => children.extend(nested),
                other => children.push(other),
            }
        }

        match children.len() {
            0 => Self::True,
            1 => children.pop().unwrap_or(Self::True),
            _ => Self::And(children),
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::all_of([self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl Not for Predicate {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}
