//! query-resolve – typed access to decoded request query parameters.
//!
//! A request layer hands over each query parameter as one of three shapes,
//! modelled by [`value::QueryValue`]:
//! * `Absent` – the parameter was not sent.
//! * `Single` – sent once, `?name=alice`.
//! * `Multiple` – sent repeatedly, `?tag=a&tag=b`, in occurrence order.
//!
//! The resolvers reduce such a value to something a handler can use directly:
//! * [`resolve::resolve_query_string`] – first non-empty string, or `None`.
//! * [`resolve::require_query_string`] – same, but a missing value is a
//!   [`QueryError::MissingParameter`].
//! * [`resolve::resolve_query_array`] – tokens split by a [`delimiter::Delimiter`]
//!   (literal or regular expression), trimmed, empties dropped, optionally
//!   flattened by a second split.
//! * [`resolve::resolve_query_boolean`] – `true` only for the exact string `"true"`.
//!
//! [`predicate::is_boolean`] is the matching runtime check for values of unknown type.
//!
//! ## Quick Start
//! ```
//! use query_resolve::{ArrayOptions, QueryParams};
//! let params = QueryParams::from_pairs([("tags", "a, b"), ("tags", "c"), ("debug", "true")]);
//! assert_eq!(params.array("tags", &ArrayOptions::new().flat(true)), vec!["a", "b", "c"]);
//! assert!(params.boolean("debug"));
//! assert_eq!(params.string("name"), None);
//! assert_eq!(
//!     params.require_string("name", None).unwrap_err().to_string(),
//!     "Missing required query parameter"
//! );
//! ```
//!
//! ## Service
//! The [`server`] module exposes the resolvers over HTTP (`/v1/resolve`) with
//! array options taken from [`settings::Settings`]; the `query-resolve` binary
//! runs it.
//!
//! Decoding is never done here: values are expected to be percent-decoded
//! already, and raw query strings are not parsed.

pub mod delimiter;
pub mod error;
pub mod predicate;
pub mod resolve;
pub mod server;
pub mod settings;
pub mod value;

pub use delimiter::{ArrayOptions, Delimiter};
pub use error::{DEFAULT_MISSING_MESSAGE, QueryError, Result};
pub use predicate::{as_boolean, is_boolean};
pub use resolve::{
    StringOptions, require_query_string, resolve_query_array, resolve_query_boolean,
    resolve_query_string, resolve_query_string_with,
};
pub use value::{QueryParams, QueryValue};
