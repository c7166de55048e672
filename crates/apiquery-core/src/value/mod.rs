mod compare;


use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::{borrow::Cow, fmt};
use ulid::Ulid;

pub use compare::{canonical_cmp, compare_eq, compare_order};

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// ValueEnum
///
/// Enum variant carried as a value. The ordinal is the declaration index
/// of the variant and drives ordering; the name is what clients send.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueEnum {
    pub variant: String,
    pub ordinal: u32,
}

impl ValueEnum {
    #[must_use]
    pub fn new(variant: impl Into<String>, ordinal: u32) -> Self {
        Self {
            variant: variant.into(),
            ordinal,
        }
    }
}

///
/// Value
///
/// Runtime representation of attribute values and coerced literals.
///
/// Null → the attribute is `Option::None`, or it was read through a
/// to-one relationship whose related object is absent.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Date(NaiveDate),
    Enum(ValueEnum),
    Float(f64),
    Int(i64),
    Null,
    Text(String),
    Timestamp(DateTime<Utc>),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    ///
    /// TEXT COMPARISON
    ///

    fn fold_ci(s: &str) -> Cow<'_, str> {
        if s.is_ascii() {
            return Cow::Owned(s.to_ascii_lowercase());
        }

        Cow::Owned(s.to_lowercase())
    }

    fn text_with_mode(s: &str, mode: TextMode) -> Cow<'_, str> {
        match mode {
            TextMode::Cs => Cow::Borrowed(s),
            TextMode::Ci => Self::fold_ci(s),
        }
    }

    fn text_op(
        &self,
        other: &Self,
        mode: TextMode,
        f: impl Fn(&str, &str) -> bool,
    ) -> Option<bool> {
        let (a, b) = (self.as_text()?, other.as_text()?);
        let a = Self::text_with_mode(a, mode);
        let b = Self::text_with_mode(b, mode);

        Some(f(&a, &b))
    }

    #[must_use]
    /// Check whether `needle` is a substring of `self` under the given text mode.
    pub fn text_contains(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.contains(b))
    }

    #[must_use]
    /// Check whether `self` starts with `needle` under the given text mode.
    pub fn text_starts_with(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.starts_with(b))
    }

    #[must_use]
    /// Check whether `self` ends with `needle` under the given text mode.
    pub fn text_ends_with(&self, needle: &Self, mode: TextMode) -> Option<bool> {
        self.text_op(needle, mode, |a, b| a.ends_with(b))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Enum(v) => write!(f, "{}", v.variant),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => write!(f, "null"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}
