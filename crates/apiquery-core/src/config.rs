use crate::value::TextMode;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read query config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid query config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid query config: {0}")]
    Invalid(String),
}

///
/// QueryConfig
///
/// Compiler-wide settings. Every key is optional in TOML; missing keys fall
/// back to `Default`.
///
/// ```toml
/// list_separator = ";"
/// text_case = "ci"
/// default_page_size = 25
/// max_page_size = 100
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Separator between literals of list operations (`in`, `all`, ...).
    pub list_separator: char,

    /// Case handling for `like`, `startsWith`, and `endsWith`.
    pub text_case: TextMode,

    /// Page size used when a request names none. Zero disables paging.
    pub default_page_size: i64,

    /// Upper bound applied to requested page sizes.
    pub max_page_size: Option<i64>,
}

impl QueryConfig {
    pub const DEFAULT_LIST_SEPARATOR: char = ',';

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    /// Page size to apply for a request that asked for `requested`.
    ///
    /// The cap only clamps positive sizes; a non-positive size keeps
    /// pagination disabled.
    #[must_use]
    pub fn effective_page_size(&self, requested: Option<i64>) -> i64 {
        let size = requested.unwrap_or(self.default_page_size);

        match self.max_page_size {
            Some(max) if max > 0 && size > max => max,
            _ => size,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.list_separator.is_alphanumeric() || self.list_separator.is_whitespace() {
            return Err(ConfigError::Invalid(format!(
                "list_separator '{}' must be punctuation",
                self.list_separator
            )));
        }

        if let Some(max) = self.max_page_size
            && max <= 0
        {
            return Err(ConfigError::Invalid(format!(
                "max_page_size must be positive, got {max}"
            )));
        }

        if self.default_page_size < 0 {
            return Err(ConfigError::Invalid(format!(
                "default_page_size must not be negative, got {}",
                self.default_page_size
            )));
        }

        Ok(())
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            list_separator: Self::DEFAULT_LIST_SEPARATOR,
            text_case: TextMode::Cs,
            default_page_size: 0,
            max_page_size: None,
        }
    }
}

///
/// TESTS
///
