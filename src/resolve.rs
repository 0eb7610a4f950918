//! Resolvers turning a [`QueryValue`] into a typed scalar.
//!
//! * [`resolve_query_string`] / [`require_query_string`] – first non-empty string.
//! * [`resolve_query_array`] – delimiter splitting with an optional flatten pass.
//! * [`resolve_query_boolean`] – `true` only for the exact literal `"true"`.
//!
//! None of them decode or trim scalar values; decoding is the request layer's
//! job and only the array resolver trims its tokens.

use tracing::{debug, trace};

use crate::delimiter::ArrayOptions;
use crate::error::{QueryError, Result};
use crate::value::QueryValue;

/// Options for [`resolve_query_string_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringOptions {
    pub required: bool,
    /// Replaces the default message of a missing required parameter.
    pub message: Option<String>,
}

impl StringOptions {
    pub fn required() -> Self {
        Self { required: true, message: None }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

fn candidate(value: &QueryValue) -> Option<&str> {
    value.first().filter(|s| !s.is_empty())
}

/// The value of a single parameter, or the first occurrence of a repeated
/// one. Empty strings count as absent; whitespace does not.
pub fn resolve_query_string(value: &QueryValue) -> Option<&str> {
    candidate(value)
}

/// Like [`resolve_query_string`] but a missing value is an error carrying
/// `message`, or [`DEFAULT_MISSING_MESSAGE`](crate::error::DEFAULT_MISSING_MESSAGE).
pub fn require_query_string<'a>(value: &'a QueryValue, message: Option<&str>) -> Result<&'a str> {
    match candidate(value) {
        Some(resolved) => Ok(resolved),
        None => {
            let err = QueryError::missing(message);
            debug!(error = %err, "required query parameter missing");
            Err(err)
        }
    }
}

pub fn resolve_query_string_with<'a>(
    value: &'a QueryValue,
    options: &StringOptions,
) -> Result<Option<&'a str>> {
    if options.required {
        require_query_string(value, options.message.as_deref()).map(Some)
    } else {
        Ok(resolve_query_string(value))
    }
}

// Same set as ECMAScript `String.prototype.trim`: NEL is kept, BOM is removed.
fn is_token_space(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{0085}' && c.is_whitespace())
}

fn tidy<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    pieces
        .into_iter()
        .map(|piece| piece.trim_matches(is_token_space))
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Splits a parameter into trimmed, non-empty tokens.
///
/// A single value is split by `options.delimiter`; a repeated parameter
/// contributes one token per occurrence. With `options.flat` every token is
/// split once more by the flat delimiter, so `?items=a,b&items=c` yields
/// `["a", "b", "c"]`.
pub fn resolve_query_array<'a>(value: &'a QueryValue, options: &ArrayOptions) -> Vec<&'a str> {
    let raw = match value {
        QueryValue::Absent => return Vec::new(),
        QueryValue::Single(single) if single.is_empty() => return Vec::new(),
        QueryValue::Single(single) => options.delimiter.split(single),
        QueryValue::Multiple(values) => values.iter().map(String::as_str).collect(),
    };
    let base = tidy(raw);
    if !options.flat {
        trace!(tokens = base.len(), delimiter = %options.delimiter, "resolved query array");
        return base;
    }

    let flat_delimiter = options.effective_flat_delimiter();
    let flattened: Vec<&str> = base
        .into_iter()
        .flat_map(|token| tidy(flat_delimiter.split(token)))
        .collect();
    trace!(tokens = flattened.len(), delimiter = %options.delimiter, flat_delimiter = %flat_delimiter, "resolved flattened query array");
    flattened
}

pub fn resolve_query_boolean(value: &QueryValue) -> bool {
    candidate(value) == Some("true")
}

// ---- deprecated names ----

#[deprecated(note = "use resolve_query_string")]
pub fn parse_as_str(value: &QueryValue) -> Option<&str> {
    resolve_query_string(value)
}

#[deprecated(note = "use require_query_string")]
pub fn parse_as_str_required<'a>(value: &'a QueryValue, message: Option<&str>) -> Result<&'a str> {
    require_query_string(value, message)
}

#[deprecated(note = "use resolve_query_array")]
pub fn parse_as_arr<'a>(value: &'a QueryValue, options: &ArrayOptions) -> Vec<&'a str> {
    resolve_query_array(value, options)
}

#[deprecated(note = "use resolve_query_boolean")]
pub fn parse_as_bool(value: &QueryValue) -> bool {
    resolve_query_boolean(value)
}
