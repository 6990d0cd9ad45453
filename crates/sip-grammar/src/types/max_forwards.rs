//! Max-Forwards header ([RFC 3261 §20.22](https://datatracker.ietf.org/doc/html/rfc3261#section-20.22)).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::headers::simple::parse_max_forwards;

/// Remaining hop count for a request.
///
/// ```rust
/// use sip_grammar::types::max_forwards::MaxForwards;
///
/// let mut hops = MaxForwards::default();
/// hops.decrement();
/// assert_eq!(hops.value(), 69);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaxForwards(pub u32);

impl MaxForwards {
    /// Initial value recommended by RFC 3261.
    pub const DEFAULT: u32 = 70;

    pub fn new(value: u32) -> Self {
        MaxForwards(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Decrements the count, stopping at zero.
    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    /// Increments the count, stopping at `u32::MAX`.
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// `true` once the request may not be forwarded any further.
    pub fn is_exhausted(&self) -> bool {
        self.0 == 0
    }
}

impl Default for MaxForwards {
    fn default() -> Self {
        MaxForwards(Self::DEFAULT)
    }
}

impl fmt::Display for MaxForwards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MaxForwards {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_max_forwards(s)
    }
}
