//! # Name-Addr Values
//!
//! [`NameAddress`] is the value carried by every address-bearing header
//! (`To`, `From`, `Contact`, `Route`, `Record-Route`, `Refer-To`,
//! `Referred-By`), as described in
//! [RFC 3261 §20.10](https://datatracker.ietf.org/doc/html/rfc3261#section-20.10):
//!
//! ```text
//! name-addr = [ display-name ] LAQUOT addr-spec RAQUOT
//! ```
//!
//! followed by any number of `;`-separated header parameters.
//!
//! ## Examples
//!
//! ```rust
//! use sip_grammar::types::address::NameAddress;
//! use std::str::FromStr;
//!
//! let addr = NameAddress::from_str("\"Bob\" <sips:bob@biloxi.com>;tag=a6c85cf").unwrap();
//! assert_eq!(addr.display_name, "Bob");
//! assert_eq!(addr.tag(), Some("a6c85cf"));
//! assert_eq!(addr.to_string(), "\"Bob\" <sips:bob@biloxi.com>;tag=a6c85cf");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::address::parse_address;
use crate::types::param::Params;
use crate::types::uri::{SipUri, Uri};

/// A display name, URI and header parameters.
///
/// `display_name` holds the unescaped text; it is quoted (and `"` / `\`
/// re-escaped) when rendered. `params` are header parameters such as `tag`
/// or `expires`, distinct from the URI's own parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameAddress {
    /// Display name, empty when absent
    pub display_name: String,
    /// The addr-spec
    pub uri: Uri,
    /// Header parameters in wire order
    pub params: Params,
}

impl NameAddress {
    /// Creates an address for `uri` with no display name or parameters.
    pub fn new(uri: impl Into<Uri>) -> Self {
        NameAddress {
            display_name: String::new(),
            uri: uri.into(),
            params: Params::new(),
        }
    }

    /// The `*` wildcard address used by `Contact` in REGISTER.
    pub fn wildcard() -> Self {
        NameAddress::new(SipUri::wildcard())
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Appends (or overwrites) a header parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }

    /// Sets the `tag` parameter.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.set_tag(tag);
        self
    }

    /// The `tag` parameter, if present.
    pub fn tag(&self) -> Option<&str> {
        self.params.get("tag")
    }

    /// Sets (or replaces) the `tag` parameter.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.params.add("tag", tag);
    }

    /// Returns `true` if the URI is the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.uri.is_wildcard()
    }
}

/// Writes `name` as a quoted-string.
fn write_quoted<W: fmt::Write>(out: &mut W, name: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in name.chars() {
        if c == '"' || c == '\\' {
            out.write_char('\\')?;
        }
        out.write_char(c)?;
    }
    out.write_char('"')
}

impl fmt::Display for NameAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = matches!(&self.uri, Uri::Sip(uri) if uri.is_bare_wildcard());
        if bare && self.display_name.is_empty() {
            f.write_str("*")?;
        } else {
            if !self.display_name.is_empty() {
                write_quoted(f, &self.display_name)?;
                f.write_str(" ")?;
            }
            write!(f, "<{}>", self.uri)?;
        }

        for pair in &self.params {
            write!(f, ";{}", pair)?;
        }
        Ok(())
    }
}

impl FromStr for NameAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_address(s)
    }
}
