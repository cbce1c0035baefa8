//! HTTP header types
//!
//! Headers are kept as an ordered multi-map: insertion order is preserved and
//! a name may appear more than once. Name lookups are ASCII case-insensitive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// A single HTTP header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Content-Type")
    pub name: String,
    /// The header value (e.g., "application/json")
    pub value: String,
}

impl Header {
    /// Creates a header without validating the name.
    ///
    /// Use [`Header::parse`] for names coming from configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a header, rejecting blank names and names containing
    /// whitespace, control characters or `:`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidHeaderName`] when the name is not a valid token.
    pub fn parse(name: impl Into<String>, value: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let valid = !name.trim().is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_graphic() && c != ':');
        if !valid {
            return Err(DomainError::InvalidHeaderName(name));
        }
        Ok(Self::new(name, value))
    }

    /// Returns true when this header has the given name, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An ordered collection of HTTP headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builds a validated collection from `(name, value)` pairs, keeping order
    /// and duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidHeaderName`] for the first invalid name.
    pub fn parse_pairs<I, N, V>(pairs: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| Header::parse(name, value))
            .collect()
    }

    /// Appends a header, keeping any existing value with the same name.
    pub fn append(&mut self, header: Header) {
        self.items.push(header);
    }

    /// Appends all headers of `other` after the existing ones.
    pub fn extend(&mut self, other: &Self) {
        self.items.extend(other.items.iter().cloned());
    }

    /// Replaces every value of `name` with a single value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.items.push(Header::new(name, value));
    }

    /// Removes every header with the given name.
    pub fn remove(&mut self, name: &str) {
        self.items.retain(|h| !h.is(name));
    }

    /// Returns the first value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.is(name))
            .map(|h| h.value.as_str())
    }

    /// Returns every value of `name` in insertion order.
    pub fn get_all<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.items
            .iter()
            .filter(move |h| h.is(name))
            .map(|h| h.value.as_str())
    }

    /// Returns true if at least one header has the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|h| h.is(name))
    }

    /// Returns an iterator over all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// Returns the number of header entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Groups the headers into a JSON object of `name -> [values]`.
    ///
    /// Names keep the spelling and position of their first occurrence.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut grouped: Map<String, Value> = Map::new();
        for header in &self.items {
            let key = grouped
                .keys()
                .find(|k| k.eq_ignore_ascii_case(&header.name))
                .cloned()
                .unwrap_or_else(|| header.name.clone());
            let entry = grouped
                .entry(key)
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(values) = entry {
                values.push(Value::String(header.value.clone()));
            }
        }
        Value::Object(grouped)
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
