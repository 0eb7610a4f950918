//! Delimiters and the options of the array resolver.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Either a literal separator or a regular expression matching separators.
#[derive(Debug, Clone)]
pub enum Delimiter {
    Literal(String),
    Pattern(Regex),
}

impl Delimiter {
    pub fn literal(separator: impl Into<String>) -> Self {
        Delimiter::Literal(separator.into())
    }

    pub fn pattern(source: &str) -> Result<Self> {
        Ok(Delimiter::Pattern(Regex::new(source)?))
    }

    /// Any run of whitespace.
    pub fn whitespace() -> Self {
        Delimiter::Pattern(WHITESPACE.clone())
    }

    /// Splits `haystack` into the pieces between separators. Pieces are not
    /// trimmed and may be empty.
    pub fn split<'h>(&self, haystack: &'h str) -> Vec<&'h str> {
        match self {
            Delimiter::Literal(separator) => haystack.split(separator.as_str()).collect(),
            Delimiter::Pattern(pattern) => pattern.split(haystack).collect(),
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Literal(",".to_string())
    }
}

impl PartialEq for Delimiter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Delimiter::Literal(a), Delimiter::Literal(b)) => a == b,
            (Delimiter::Pattern(a), Delimiter::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
impl Eq for Delimiter {}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Literal(separator) => write!(f, "{:?}", separator),
            Delimiter::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
        }
    }
}

impl From<&str> for Delimiter {
    fn from(separator: &str) -> Self { Delimiter::literal(separator) }
}
impl From<String> for Delimiter {
    fn from(separator: String) -> Self { Delimiter::Literal(separator) }
}
impl From<char> for Delimiter {
    fn from(separator: char) -> Self { Delimiter::Literal(separator.to_string()) }
}
impl From<Regex> for Delimiter {
    fn from(pattern: Regex) -> Self { Delimiter::Pattern(pattern) }
}

/// How [`resolve_query_array`](crate::resolve::resolve_query_array) splits values.
///
/// `flat_delimiter` falls back to `delimiter` when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayOptions {
    pub delimiter: Delimiter,
    pub flat: bool,
    pub flat_delimiter: Option<Delimiter>,
}

impl ArrayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn flat(mut self, flat: bool) -> Self {
        self.flat = flat;
        self
    }

    pub fn flat_delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.flat_delimiter = Some(delimiter.into());
        self
    }

    pub fn effective_flat_delimiter(&self) -> &Delimiter {
        self.flat_delimiter.as_ref().unwrap_or(&self.delimiter)
    }
}
