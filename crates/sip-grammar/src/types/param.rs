//! # SIP Parameters
//!
//! This module provides the insertion-ordered parameter map shared by every
//! parameter-bearing element of the grammar:
//!
//! - URI parameters (e.g., `sip:user@example.com;transport=tcp;lr`)
//! - URI headers (e.g., `sip:user@example.com?subject=meeting&priority=urgent`)
//! - Header field parameters (e.g., `To: <sip:bob@biloxi.com>;tag=a6c85cf`)
//!
//! RFC 3261 treats parameters as a set, but a number of deployed elements are
//! sensitive to their order, so [`Params`] reproduces the wire order exactly
//! when it is rendered back to text.
//!
//! ## Examples
//!
//! ```rust
//! use sip_grammar::types::param::Params;
//!
//! let mut params = Params::new();
//! params.add("transport", "tcp").add("lr", "");
//! assert_eq!(params.to_string_with(';'), "transport=tcp;lr");
//!
//! // Overwriting keeps the original position
//! params.add("transport", "udp");
//! assert_eq!(params.keys().collect::<Vec<_>>(), vec!["transport", "lr"]);
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single `key[=value]` parameter.
///
/// An empty `value` denotes a flag parameter such as `;lr` or `;rport`,
/// which renders without the `=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    /// Parameter name, kept exactly as it appeared on the wire
    pub key: String,
    /// Parameter value, empty for flag parameters
    pub value: String,
}

impl Pair {
    /// Creates a new pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Pair {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a flag parameter (a key without a value).
    pub fn flag(key: impl Into<String>) -> Self {
        Pair::new(key, String::new())
    }

    /// Returns `true` if this pair has no value.
    pub fn is_flag(&self) -> bool {
        self.value.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for Pair {
    fn from((key, value): (K, V)) -> Self {
        Pair::new(key, value)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)?;
        if !self.value.is_empty() {
            write!(f, "={}", self.value)?;
        }
        Ok(())
    }
}

/// Insertion-ordered parameter map.
///
/// Backed by a vector of [`Pair`]s plus an index from key to position, so
/// lookups are O(1) on average while iteration and rendering follow
/// insertion order. Removal is O(n) because every later position has to be
/// shifted down, which is acceptable for the handful of parameters a SIP
/// element usually carries.
///
/// `Params::default()` is a valid empty map, so an "uninitialized" map needs
/// no special handling before calling [`Params::add`].
///
/// Equality is order-sensitive: two maps holding the same pairs inserted in a
/// different order are not equal.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::types::param::{Pair, Params};
///
/// let a: Params = vec![Pair::new("a", "1"), Pair::new("b", "2")].into();
/// let b: Params = vec![Pair::new("b", "2"), Pair::new("a", "1")].into();
/// assert_ne!(a, b);
/// assert_eq!(a.get("b"), Some("2"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Pair>", into = "Vec<Pair>")]
pub struct Params {
    pairs: Vec<Pair>,
    index: HashMap<String, usize>,
}

impl Params {
    /// Creates an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty parameter map with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Params {
            pairs: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Adds a parameter, returning the map for chaining.
    ///
    /// If `key` already exists its value is overwritten in place and its
    /// position is left unchanged; otherwise the pair is appended.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.add_pair(Pair::new(key, value))
    }

    /// Adds a pre-built [`Pair`] with the same semantics as [`Params::add`].
    pub fn add_pair(&mut self, pair: Pair) -> &mut Self {
        match self.index.get(&pair.key) {
            Some(&pos) => self.pairs[pos].value = pair.value,
            None => {
                self.index.insert(pair.key.clone(), self.pairs.len());
                self.pairs.push(pair);
            }
        }
        self
    }

    /// Adds every pair from `pairs` in order.
    pub fn add_pairs<I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = Pair>,
    {
        for pair in pairs {
            self.add_pair(pair);
        }
        self
    }

    /// Builder form of [`Params::add`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// Returns the value stored for `key`.
    ///
    /// Flag parameters yield `Some("")`; use [`Params::has`] when only
    /// presence matters.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.pairs[pos].value.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// All entries after the removed one keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.index.remove(key)?;
        let removed = self.pairs.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed.value)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.pairs.iter().map(|p| p.key.as_str())
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Removes every parameter.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.index.clear();
    }

    /// Renders the parameters joined by `sep`, without a leading or trailing
    /// separator. Flag parameters are rendered without `=`.
    ///
    /// No escaping is applied; values are written exactly as stored.
    pub fn to_string_with(&self, sep: char) -> String {
        let mut out = String::with_capacity(self.pairs.len() * 16);
        // Writing into a String cannot fail
        let _ = self.write_with(sep, &mut out);
        out
    }

    /// Writes the parameters joined by `sep` into `out`.
    pub fn write_with<W: fmt::Write>(&self, sep: char, out: &mut W) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.write_char(sep)?;
            }
            write!(out, "{}", pair)?;
        }
        Ok(())
    }
}

impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        // Positions are derived from `pairs`, so comparing the vectors
        // compares length, keys, values and positions at once.
        self.pairs == other.pairs
    }
}

impl Eq for Params {}

impl fmt::Display for Params {
    /// Renders with `&`, the URI-header separator. Use
    /// [`Params::to_string_with`] for `;`-separated parameters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with('&', f)
    }
}

impl From<Vec<Pair>> for Params {
    fn from(pairs: Vec<Pair>) -> Self {
        let mut params = Params::with_capacity(pairs.len());
        params.add_pairs(pairs);
        params
    }
}

impl From<Params> for Vec<Pair> {
    fn from(params: Params) -> Self {
        params.pairs
    }
}

impl FromIterator<Pair> for Params {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        let mut params = Params::new();
        params.add_pairs(iter);
        params
    }
}

impl Extend<Pair> for Params {
    fn extend<I: IntoIterator<Item = Pair>>(&mut self, iter: I) {
        self.add_pairs(iter);
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
