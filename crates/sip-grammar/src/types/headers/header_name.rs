use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// SIP header names understood by the grammar engine.
///
/// Header names are case-insensitive and several have a compact form
/// ([RFC 3261 §7.3.3](https://datatracker.ietf.org/doc/html/rfc3261#section-7.3.3));
/// both spellings map to the same variant. Every other name is kept verbatim
/// in [`HeaderName::Other`].
///
/// # Examples
///
/// ```rust
/// use sip_grammar::types::headers::HeaderName;
///
/// assert_eq!(HeaderName::from("v"), HeaderName::Via);
/// assert_eq!(HeaderName::from("CALL-ID"), HeaderName::CallId);
/// assert_eq!(HeaderName::CallId.as_str(), "Call-ID");
/// assert!(HeaderName::from("X-Custom").matches("x-custom"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderName {
    /// Via / v
    Via,
    /// From / f
    From,
    /// To / t
    To,
    /// Contact / m
    Contact,
    /// Route
    Route,
    /// Record-Route
    RecordRoute,
    /// Refer-To / r
    ReferTo,
    /// Referred-By / b
    ReferredBy,
    /// Call-ID / i
    CallId,
    /// CSeq
    CSeq,
    /// Max-Forwards
    MaxForwards,
    /// Any other header, spelled as received
    Other(String),
}

/// (long form, compact form, name)
const KNOWN_NAMES: &[(&str, Option<&str>, HeaderName)] = &[
    ("Via", Some("v"), HeaderName::Via),
    ("From", Some("f"), HeaderName::From),
    ("To", Some("t"), HeaderName::To),
    ("Contact", Some("m"), HeaderName::Contact),
    ("Route", None, HeaderName::Route),
    ("Record-Route", None, HeaderName::RecordRoute),
    ("Refer-To", Some("r"), HeaderName::ReferTo),
    ("Referred-By", Some("b"), HeaderName::ReferredBy),
    ("Call-ID", Some("i"), HeaderName::CallId),
    ("CSeq", None, HeaderName::CSeq),
    ("Max-Forwards", None, HeaderName::MaxForwards),
];

impl HeaderName {
    /// Canonical spelling of the header name.
    pub fn as_str(&self) -> &str {
        match self {
            HeaderName::Other(name) => name,
            known => KNOWN_NAMES
                .iter()
                .find(|(_, _, n)| n == known)
                .map(|(long, _, _)| *long)
                .unwrap_or_default(),
        }
    }

    /// The compact form, if the header has one.
    pub fn compact(&self) -> Option<&'static str> {
        KNOWN_NAMES
            .iter()
            .find(|(_, _, n)| n == self)
            .and_then(|(_, compact, _)| *compact)
    }

    /// Returns `true` if `name` (long, compact, any case) names this header.
    pub fn matches(&self, name: &str) -> bool {
        match (self, HeaderName::from(name)) {
            (HeaderName::Other(a), HeaderName::Other(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => *a == b,
        }
    }

    /// `true` for [`HeaderName::Other`].
    pub fn is_other(&self) -> bool {
        matches!(self, HeaderName::Other(_))
    }
}

impl std::convert::From<&str> for HeaderName {
    fn from(name: &str) -> Self {
        KNOWN_NAMES
            .iter()
            .find(|(long, compact, _)| {
                long.eq_ignore_ascii_case(name)
                    || compact.map_or(false, |c| c.eq_ignore_ascii_case(name))
            })
            .map(|(_, _, n)| n.clone())
            .unwrap_or_else(|| HeaderName::Other(name.to_string()))
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidHeader("empty header name".to_string()));
        }
        Ok(HeaderName::from(s))
    }
}
