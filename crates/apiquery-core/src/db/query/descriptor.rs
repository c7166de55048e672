use crate::error::QueryError;
use std::{fmt, str::FromStr};

///
/// Descriptors
///
/// Immutable request-scoped inputs produced by the query-string parser.
/// They carry public member names and raw literals; nothing here has been
/// resolved or coerced yet.
///

///
/// Arity
/// Shape of the literal an operation consumes.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Nullary,
    Single,
    List,
}

///
/// FilterOperation
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterOperation {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    StartsWith,
    EndsWith,
    IsNull,
    IsNotNull,
    In,
    NotIn,
    All,
    MatchAll,
    Exclude,
}

impl FilterOperation {
    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::IsNull | Self::IsNotNull => Arity::Nullary,
            Self::Eq
            | Self::Ne
            | Self::Lt
            | Self::Le
            | Self::Gt
            | Self::Ge
            | Self::Like
            | Self::StartsWith
            | Self::EndsWith => Arity::Single,
            Self::In | Self::NotIn | Self::All | Self::MatchAll | Self::Exclude => Arity::List,
        }
    }

    #[must_use]
    pub const fn is_substring(self) -> bool {
        matches!(self, Self::Like | Self::StartsWith | Self::EndsWith)
    }

    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }

    /// Operations that quantify over every listed value of a to-many relationship.
    #[must_use]
    pub const fn is_quantified(self) -> bool {
        matches!(self, Self::All | Self::MatchAll | Self::Exclude)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Like => "like",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::All => "all",
            Self::MatchAll => "matchAll",
            Self::Exclude => "exclude",
        }
    }
}

impl fmt::Display for FilterOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterOperation {
    type Err = QueryError;

    /// Accepts the canonical names plus the short wire tokens
    /// (`sw`, `ew`, `nin`, `_all_`, ...), ASCII case-insensitively.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let op = match token.to_ascii_lowercase().as_str() {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "lt" => Self::Lt,
            "le" => Self::Le,
            "gt" => Self::Gt,
            "ge" => Self::Ge,
            "like" => Self::Like,
            "sw" | "startswith" => Self::StartsWith,
            "ew" | "endswith" => Self::EndsWith,
            "isnull" => Self::IsNull,
            "isnotnull" => Self::IsNotNull,
            "in" => Self::In,
            "nin" | "notin" => Self::NotIn,
            "all" => Self::All,
            "_all_" | "matchall" => Self::MatchAll,
            "exclude" => Self::Exclude,
            _ => {
                return Err(QueryError::UnsupportedFilterOperation {
                    op: token.to_string(),
                });
            }
        };

        Ok(op)
    }
}

///
/// FilterDescriptor
///
/// `attribute` is a simple name or `relationship.attribute`. When
/// `relationship` is set the attribute resolves on the related type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterDescriptor {
    pub attribute: String,
    pub relationship: Option<String>,
    pub operation: FilterOperation,
    pub value: String,
}

impl FilterDescriptor {
    #[must_use]
    pub fn new(
        attribute: impl Into<String>,
        operation: FilterOperation,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            relationship: None,
            operation,
            value: value.into(),
        }
    }

    /// Filter with a nullary operation; the literal is ignored.
    #[must_use]
    pub fn nullary(attribute: impl Into<String>, operation: FilterOperation) -> Self {
        Self::new(attribute, operation, String::new())
    }

    #[must_use]
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }
}

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

///
/// SortDescriptor
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortDescriptor {
    pub attribute: String,
    pub relationship: Option<String>,
    pub direction: SortDirection,
}

impl SortDescriptor {
    #[must_use]
    pub fn new(attribute: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            attribute: attribute.into(),
            relationship: None,
            direction,
        }
    }

    #[must_use]
    pub fn ascending(attribute: impl Into<String>) -> Self {
        Self::new(attribute, SortDirection::Ascending)
    }

    #[must_use]
    pub fn descending(attribute: impl Into<String>) -> Self {
        Self::new(attribute, SortDirection::Descending)
    }

    /// Parse one sort key in wire form: `title`, `-title`, `author.name`.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        match key.strip_prefix('-') {
            Some(attribute) => Self::descending(attribute),
            None => Self::ascending(key.strip_prefix('+').unwrap_or(key)),
        }
    }

    /// Parse a separated list of sort keys, skipping empty segments.
    #[must_use]
    pub fn parse_list(keys: &str, separator: char) -> Vec<Self> {
        keys.split(separator)
            .filter(|key| !key.trim().is_empty())
            .map(Self::parse)
            .collect()
    }

    #[must_use]
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }
}

///
/// FieldSelection
///
/// Ordered, de-duplicated list of selected member paths. A path is an
/// attribute name, `relationship.attribute`, or a bare relationship name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldSelection {
    paths: Vec<String>,
}

impl FieldSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for path in paths {
            selection.push(path);
        }

        selection
    }

    /// Parse the wire form (`title,author.name`), skipping empty segments.
    #[must_use]
    pub fn parse(fields: &str, separator: char) -> Self {
        Self::from_paths(
            fields
                .split(separator)
                .map(str::trim)
                .filter(|path| !path.is_empty()),
        )
    }

    /// Append `path` unless it is already selected.
    pub fn push(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

///
/// PageRequest
///
/// `size = None` defers to the configured default page size.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PageRequest {
    pub size: Option<i64>,
    pub number: i64,
}

impl PageRequest {
    #[must_use]
    pub const fn new(size: i64, number: i64) -> Self {
        Self {
            size: Some(size),
            number,
        }
    }
}

///
/// QueryDescriptors
/// Everything one request asks of a collection.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryDescriptors {
    pub filters: Vec<FilterDescriptor>,
    pub sorts: Vec<SortDescriptor>,
    pub selection: Option<FieldSelection>,
    pub page: PageRequest,
}
