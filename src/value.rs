//! The decoded shape of a query parameter and the mapping that holds them.
//!
//! A request layer hands over parameters that are already percent-decoded.
//! Each name is bound to a [`QueryValue`]: nothing at all, one string, or the
//! ordered list of strings produced by a repeated name (`?tag=a&tag=b`).

use std::collections::HashMap;
use std::collections::hash_map::Entry::{Occupied, Vacant};

use serde::{Deserialize, Serialize};

use crate::delimiter::ArrayOptions;
use crate::error::Result;
use crate::resolve::{
    require_query_string, resolve_query_array, resolve_query_boolean, resolve_query_string,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    #[default]
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl QueryValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, QueryValue::Absent)
    }

    /// The string a scalar resolver looks at: the value itself, or the first
    /// occurrence of a repeated parameter.
    pub fn first(&self) -> Option<&str> {
        match self {
            QueryValue::Absent => None,
            QueryValue::Single(value) => Some(value),
            QueryValue::Multiple(values) => values.first().map(String::as_str),
        }
    }

    fn push(&mut self, value: String) {
        *self = match std::mem::take(self) {
            QueryValue::Absent => QueryValue::Single(value),
            QueryValue::Single(previous) => QueryValue::Multiple(vec![previous, value]),
            QueryValue::Multiple(mut values) => {
                values.push(value);
                QueryValue::Multiple(values)
            }
        };
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self { QueryValue::Single(value.to_string()) }
}
impl From<String> for QueryValue {
    fn from(value: String) -> Self { QueryValue::Single(value) }
}
impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self { QueryValue::Multiple(values) }
}
impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::Multiple(values.into_iter().map(String::from).collect())
    }
}
impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Absent, Into::into)
    }
}

static ABSENT: QueryValue = QueryValue::Absent;

/// Decoded query parameters keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(HashMap<String, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups decoded `(name, value)` pairs. A name occurring once is kept as
    /// `Single`, repeated names collect into `Multiple` in occurrence order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.append(name, value);
        }
        params
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        match self.0.entry(name.into()) {
            Occupied(mut entry) => entry.get_mut().push(value.into()),
            Vacant(entry) => {
                entry.insert(QueryValue::Single(value.into()));
            }
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Missing names read as [`QueryValue::Absent`].
    pub fn get(&self, name: &str) -> &QueryValue {
        self.0.get(name).unwrap_or(&ABSENT)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        resolve_query_string(self.get(name))
    }

    pub fn require_string(&self, name: &str, message: Option<&str>) -> Result<&str> {
        require_query_string(self.get(name), message)
    }

    pub fn array(&self, name: &str, options: &ArrayOptions) -> Vec<&str> {
        resolve_query_array(self.get(name), options)
    }

    pub fn boolean(&self, name: &str) -> bool {
        resolve_query_boolean(self.get(name))
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
