//! # SIP and TEL URIs
//!
//! This module provides the URI values produced by the URI engine, covering the
//! `sip:` and `sips:` schemes of [RFC 3261 §19.1](https://datatracker.ietf.org/doc/html/rfc3261#section-19.1)
//! and the `tel:` scheme of [RFC 3966](https://datatracker.ietf.org/doc/html/rfc3966).
//!
//! ## URI Structure
//!
//! ```text
//! sip:user:password@host:port;uri-parameters?headers
//! tel:+1-201-555-0123;phone-context=example.com
//! ```
//!
//! The set of URI kinds is closed, so [`Uri`] is an enum over [`SipUri`] and
//! [`TelUri`]. The wildcard `*` used by `Contact` is a degenerate [`SipUri`].
//!
//! Every field keeps the text exactly as it was parsed (hosts keep their IPv6
//! brackets, parameter values keep their escapes), so rendering a parsed URI
//! reproduces the original apart from scheme case.
//!
//! ## Usage Examples
//!
//! ```rust
//! use sip_grammar::types::uri::{Scheme, Uri};
//! use std::str::FromStr;
//!
//! let uri = Uri::from_str("sip:alice@example.com:5060;transport=udp?subject=meeting").unwrap();
//! assert_eq!(uri.scheme(), Scheme::Sip);
//! assert_eq!(uri.user(), Some("alice"));
//! assert_eq!(uri.host(), "example.com");
//! assert_eq!(uri.params().get("transport"), Some("udp"));
//! assert_eq!(uri.to_string(), "sip:alice@example.com:5060;transport=udp?subject=meeting");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::uri::{parse_sip_uri, parse_tel_uri, parse_uri};
use crate::types::param::Params;

/// URI schemes understood by the grammar engine.
///
/// Scheme tokens are matched case-insensitively and always rendered in
/// lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// SIP URI (non-secure)
    Sip,
    /// SIPS URI (secure SIP)
    Sips,
    /// TEL URI (telephone number)
    Tel,
}

impl Scheme {
    /// Returns the lower-case token for this scheme.
    ///
    /// ```
    /// use sip_grammar::types::uri::Scheme;
    ///
    /// assert_eq!(Scheme::Sips.as_str(), "sips");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Sip => "sip",
            Scheme::Sips => "sips",
            Scheme::Tel => "tel",
        }
    }

    /// Classifies a scheme token, ignoring ASCII case.
    ///
    /// Returns `None` for anything that is not `sip`, `sips` or `tel`.
    pub fn from_token(token: &str) -> Option<Scheme> {
        if token.eq_ignore_ascii_case("sip") {
            Some(Scheme::Sip)
        } else if token.eq_ignore_ascii_case("sips") {
            Some(Scheme::Sips)
        } else if token.eq_ignore_ascii_case("tel") {
            Some(Scheme::Tel)
        } else {
            None
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scheme::from_token(s).ok_or_else(|| Error::UnsupportedScheme(s.to_string()))
    }
}

/// A parsed `sip:` or `sips:` URI.
///
/// `port` is `None` when the URI carries no port; an explicit `:0` is
/// treated the same way. `password` is only rendered when `user` is set.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::types::uri::SipUri;
///
/// let uri = SipUri::sip("example.com")
///     .with_user("bob")
///     .with_port(5060)
///     .with_param("transport", "tcp");
/// assert_eq!(uri.to_string(), "sip:bob@example.com:5060;transport=tcp");
/// assert_eq!(uri.endpoint(), "bob@example.com:5060");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipUri {
    /// `Scheme::Sip` or `Scheme::Sips`
    pub scheme: Scheme,
    /// Set when the host is a `*` that ends the URI (see [`SipUri::is_bare_wildcard`])
    pub wildcard: bool,
    /// Set when `//` followed the scheme; cosmetic only
    pub hierarchical_slashes: bool,
    /// User part, e.g. `alice` in `sip:alice@atlanta.com`
    pub user: Option<String>,
    /// Password part; RFC 3261 discourages its use
    pub password: Option<String>,
    /// Domain, IPv4 literal or bracketed IPv6 literal
    pub host: String,
    /// Port, `None` when not specified
    pub port: Option<u16>,
    /// `;`-separated URI parameters
    pub params: Params,
    /// `&`-separated URI headers introduced by `?`
    pub headers: Params,
}

impl SipUri {
    /// Creates a URI with the given scheme and host and nothing else.
    pub fn new(scheme: Scheme, host: impl Into<String>) -> Self {
        let host = host.into();
        SipUri {
            scheme,
            wildcard: host == "*",
            hierarchical_slashes: false,
            user: None,
            password: None,
            host,
            port: None,
            params: Params::new(),
            headers: Params::new(),
        }
    }

    /// Creates a `sip:` URI for `host`.
    pub fn sip(host: impl Into<String>) -> Self {
        SipUri::new(Scheme::Sip, host)
    }

    /// Creates a `sips:` URI for `host`.
    pub fn sips(host: impl Into<String>) -> Self {
        SipUri::new(Scheme::Sips, host)
    }

    /// Creates the `*` wildcard URI.
    pub fn wildcard() -> Self {
        SipUri::new(Scheme::Sip, "*")
    }

    /// Sets the user part.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password part.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Appends (or overwrites) a URI parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }

    /// Appends (or overwrites) a URI header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(key, value);
        self
    }

    /// Returns `true` for `sips:` URIs.
    pub fn is_encrypted(&self) -> bool {
        self.scheme == Scheme::Sips
    }

    /// Sets the host, updating the wildcard flag when the host is `*`.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
        self.wildcard = self.host == "*";
    }

    /// Returns `true` when this is the plain `*` of a `Contact` wildcard,
    /// with nothing but the host set. Only then does it render as `*`.
    pub fn is_bare_wildcard(&self) -> bool {
        self.wildcard
            && self.host == "*"
            && self.scheme == Scheme::Sip
            && !self.hierarchical_slashes
            && self.user.is_none()
            && self.password.is_none()
            && self.port.is_none()
            && self.params.is_empty()
            && self.headers.is_empty()
    }

    /// User identifier in the form `user@host[:port]`.
    pub fn endpoint(&self) -> String {
        let mut out = String::with_capacity(self.host.len() + 16);
        if let Some(user) = &self.user {
            out.push_str(user);
            out.push('@');
        }
        out.push_str(&self.host_port());
        out
    }

    /// The `host[:port]` part.
    pub fn host_port(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// The URI without parameters or headers: `sip[s]:[user@]host[:port]`.
    pub fn addr(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_to(&mut out, false);
        out
    }

    fn write_to<W: fmt::Write>(&self, out: &mut W, full: bool) -> fmt::Result {
        if self.is_bare_wildcard() {
            return out.write_char('*');
        }

        write!(out, "{}:", self.scheme)?;
        if self.hierarchical_slashes {
            out.write_str("//")?;
        }

        if let Some(user) = &self.user {
            out.write_str(user)?;
            if full {
                if let Some(password) = &self.password {
                    write!(out, ":{}", password)?;
                }
            }
            out.write_char('@')?;
        }

        out.write_str(&self.host)?;
        if let Some(port) = self.port {
            write!(out, ":{}", port)?;
        }

        if full {
            if !self.params.is_empty() {
                out.write_char(';')?;
                self.params.write_with(';', out)?;
            }
            if !self.headers.is_empty() {
                out.write_char('?')?;
                self.headers.write_with('&', out)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SipUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, true)
    }
}

impl FromStr for SipUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_sip_uri(s)
    }
}

/// A parsed `tel:` URI.
///
/// The number is kept as written, visual separators included; use
/// [`TelUri::to_sip_uri`] to obtain the canonical digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelUri {
    /// Set when `//` followed the scheme; cosmetic only
    pub hierarchical_slashes: bool,
    /// Global (`+…`) or local telephone number
    pub number: String,
    /// `;`-separated parameters such as `phone-context` or `ext`
    pub params: Params,
}

impl TelUri {
    /// Creates a TEL URI for `number` without parameters.
    pub fn new(number: impl Into<String>) -> Self {
        TelUri {
            hierarchical_slashes: false,
            number: number.into(),
            params: Params::new(),
        }
    }

    /// Appends (or overwrites) a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }

    /// The URI without parameters: `tel:number`.
    pub fn addr(&self) -> String {
        let mut out = String::new();
        let _ = self.write_to(&mut out, false);
        out
    }

    /// Converts this TEL URI into a SIP URI routed to its `phone-context`.
    ///
    /// The SIP user is the number stripped of visual separators (a leading
    /// `+` is kept), the host is the `phone-context` value, and the remaining
    /// parameters are carried over followed by `user-context=phone`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingPhoneContext`] if there is no non-empty
    /// `phone-context` parameter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sip_grammar::types::uri::TelUri;
    /// use std::str::FromStr;
    ///
    /// let tel = TelUri::from_str("tel:+1-201-555-0123;phone-context=example.com").unwrap();
    /// let sip = tel.to_sip_uri().unwrap();
    /// assert_eq!(sip.to_string(), "sip:+12015550123@example.com;user-context=phone");
    /// ```
    pub fn to_sip_uri(&self) -> Result<SipUri> {
        let domain = match self.params.get("phone-context") {
            Some(domain) if !domain.is_empty() => domain,
            _ => return Err(Error::MissingPhoneContext(self.to_string())),
        };

        let mut params = self.params.clone();
        params.remove("phone-context");
        params.add("user-context", "phone");

        let mut uri = SipUri::sip(domain).with_user(strip_visual_separators(&self.number));
        uri.hierarchical_slashes = self.hierarchical_slashes;
        uri.params = params;
        Ok(uri)
    }

    fn write_to<W: fmt::Write>(&self, out: &mut W, full: bool) -> fmt::Result {
        write!(out, "{}:", Scheme::Tel)?;
        if self.hierarchical_slashes {
            out.write_str("//")?;
        }
        out.write_str(&self.number)?;
        if full && !self.params.is_empty() {
            out.write_char(';')?;
            self.params.write_with(';', out)?;
        }
        Ok(())
    }
}

/// Keeps only digits, plus a `+` in first position.
fn strip_visual_separators(number: &str) -> String {
    number
        .char_indices()
        .filter(|&(i, c)| c.is_ascii_digit() || (i == 0 && c == '+'))
        .map(|(_, c)| c)
        .collect()
}

impl fmt::Display for TelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, true)
    }
}

impl FromStr for TelUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_tel_uri(s)
    }
}

impl TryFrom<&TelUri> for SipUri {
    type Error = Error;

    fn try_from(tel: &TelUri) -> Result<Self> {
        tel.to_sip_uri()
    }
}

/// Any URI accepted by the grammar engine.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::types::uri::Uri;
/// use std::str::FromStr;
///
/// let uri = Uri::from_str("tel:7042;phone-context=example.com").unwrap();
/// assert!(uri.as_tel().is_some());
/// assert_eq!(uri.user(), Some("7042"));
/// assert_eq!(uri.host(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Uri {
    /// `sip:` / `sips:` URI, including the `*` wildcard
    Sip(SipUri),
    /// `tel:` URI
    Tel(TelUri),
}

impl Uri {
    /// The URI scheme.
    pub fn scheme(&self) -> Scheme {
        match self {
            Uri::Sip(uri) => uri.scheme,
            Uri::Tel(_) => Scheme::Tel,
        }
    }

    /// User part for SIP, number for TEL.
    pub fn user(&self) -> Option<&str> {
        match self {
            Uri::Sip(uri) => uri.user.as_deref(),
            Uri::Tel(uri) => Some(uri.number.as_str()),
        }
    }

    /// Host for SIP; TEL URIs have no host and return `""`.
    pub fn host(&self) -> &str {
        match self {
            Uri::Sip(uri) => &uri.host,
            Uri::Tel(_) => "",
        }
    }

    /// URI parameters.
    pub fn params(&self) -> &Params {
        match self {
            Uri::Sip(uri) => &uri.params,
            Uri::Tel(uri) => &uri.params,
        }
    }

    /// Mutable URI parameters.
    pub fn params_mut(&mut self) -> &mut Params {
        match self {
            Uri::Sip(uri) => &mut uri.params,
            Uri::Tel(uri) => &mut uri.params,
        }
    }

    /// URI headers; TEL URIs never have any.
    pub fn headers(&self) -> Option<&Params> {
        match self {
            Uri::Sip(uri) => Some(&uri.headers),
            Uri::Tel(_) => None,
        }
    }

    /// Replaces the user part (SIP) or number (TEL).
    pub fn set_user(&mut self, user: impl Into<String>) {
        match self {
            Uri::Sip(uri) => uri.user = Some(user.into()),
            Uri::Tel(uri) => uri.number = user.into(),
        }
    }

    /// Replaces the host.
    ///
    /// # Errors
    ///
    /// [`Error::NotApplicable`] for TEL URIs.
    pub fn set_host(&mut self, host: impl Into<String>) -> Result<()> {
        match self {
            Uri::Sip(uri) => {
                uri.set_host(host);
                Ok(())
            }
            Uri::Tel(_) => Err(Error::NotApplicable("host not allowed for TEL URI".to_string())),
        }
    }

    /// Replaces the URI parameters.
    pub fn set_params(&mut self, params: Params) {
        *self.params_mut() = params;
    }

    /// Replaces the URI headers.
    ///
    /// # Errors
    ///
    /// [`Error::NotApplicable`] for TEL URIs.
    pub fn set_headers(&mut self, headers: Params) -> Result<()> {
        match self {
            Uri::Sip(uri) => {
                uri.headers = headers;
                Ok(())
            }
            Uri::Tel(_) => Err(Error::NotApplicable(
                "header params not allowed for TEL URI".to_string(),
            )),
        }
    }

    /// Returns `true` for the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Uri::Sip(uri) if uri.wildcard)
    }

    /// Returns `true` for `sips:` URIs.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Uri::Sip(uri) if uri.is_encrypted())
    }

    /// Short form without parameters or headers.
    pub fn addr(&self) -> String {
        match self {
            Uri::Sip(uri) => uri.addr(),
            Uri::Tel(uri) => uri.addr(),
        }
    }

    /// The SIP variant, if this is one.
    pub fn as_sip(&self) -> Option<&SipUri> {
        match self {
            Uri::Sip(uri) => Some(uri),
            Uri::Tel(_) => None,
        }
    }

    /// The TEL variant, if this is one.
    pub fn as_tel(&self) -> Option<&TelUri> {
        match self {
            Uri::Tel(uri) => Some(uri),
            Uri::Sip(_) => None,
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Uri::Sip(uri) => fmt::Display::fmt(uri, f),
            Uri::Tel(uri) => fmt::Display::fmt(uri, f),
        }
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_uri(s)
    }
}

impl From<SipUri> for Uri {
    fn from(uri: SipUri) -> Self {
        Uri::Sip(uri)
    }
}

impl From<TelUri> for Uri {
    fn from(uri: TelUri) -> Self {
        Uri::Tel(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_tokens() {
        assert_eq!(Scheme::from_token("SIP"), Some(Scheme::Sip));
        assert_eq!(Scheme::from_token("sIpS"), Some(Scheme::Sips));
        assert_eq!(Scheme::from_token("Tel"), Some(Scheme::Tel));
        assert_eq!(Scheme::from_token("urn"), None);
        assert!(matches!(Scheme::from_str("http"), Err(Error::UnsupportedScheme(_))));
    }

    #[test]
    fn test_sip_uri_rendering() {
        let uri = SipUri::sips("127.0.0.1")
            .with_user("bob")
            .with_password("password")
            .with_port(5060)
            .with_param("user", "phone")
            .with_header("subject", "project%20x")
            .with_header("priority", "urgent");

        assert_eq!(
            uri.to_string(),
            "sips:bob:password@127.0.0.1:5060;user=phone?subject=project%20x&priority=urgent"
        );
        assert_eq!(uri.addr(), "sips:bob@127.0.0.1:5060");
        assert_eq!(uri.host_port(), "127.0.0.1:5060");
        assert!(uri.is_encrypted());
    }

    #[test]
    fn test_endpoint_without_user_or_port() {
        let uri = SipUri::sip("example.com");
        assert_eq!(uri.endpoint(), "example.com");
        assert_eq!(uri.host_port(), "example.com");
    }

    #[test]
    fn test_wildcard_rendering() {
        let uri = SipUri::wildcard();
        assert!(uri.wildcard);
        assert_eq!(uri.to_string(), "*");
        assert!(Uri::from(uri).is_wildcard());
    }

    #[test]
    fn test_star_host_with_components_renders_in_full() {
        let uri = SipUri::sips("*");
        assert!(!uri.is_bare_wildcard());
        assert_eq!(uri.to_string(), "sips:*");

        let uri = SipUri::sip("*").with_user("alice").with_param("transport", "udp");
        assert_eq!(uri.to_string(), "sip:alice@*;transport=udp");
        assert_eq!(uri.addr(), "sip:alice@*");

        let mut uri = SipUri::wildcard();
        uri.hierarchical_slashes = true;
        assert_eq!(uri.to_string(), "sip://*");
    }

    #[test]
    fn test_set_host_tracks_wildcard() {
        let mut uri = SipUri::sip("example.com");
        uri.set_host("*");
        assert!(uri.wildcard);
        uri.set_host("example.org");
        assert!(!uri.wildcard);
    }

    #[test]
    fn test_tel_uri_rendering() {
        let mut tel = TelUri::new("+1-201-555-0123").with_param("ext", "200");
        assert_eq!(tel.to_string(), "tel:+1-201-555-0123;ext=200");
        assert_eq!(tel.addr(), "tel:+1-201-555-0123");

        tel.hierarchical_slashes = true;
        assert_eq!(tel.to_string(), "tel://+1-201-555-0123;ext=200");
    }

    #[test]
    fn test_tel_to_sip_requires_phone_context() {
        let tel = TelUri::new("+1-201-555-0123");
        assert!(matches!(tel.to_sip_uri(), Err(Error::MissingPhoneContext(_))));

        let tel = TelUri::new("+1-201-555-0123").with_param("phone-context", "");
        assert!(matches!(SipUri::try_from(&tel), Err(Error::MissingPhoneContext(_))));
    }

    #[test]
    fn test_tel_to_sip_carries_params() {
        let tel = TelUri::new("+12-(34)-56-78")
            .with_param("Ext", "200")
            .with_param("phone-context", "example.com")
            .with_param("ISUB", "+123-456");
        let sip = tel.to_sip_uri().unwrap();

        assert_eq!(
            sip.to_string(),
            "sip:+12345678@example.com;Ext=200;ISUB=+123-456;user-context=phone"
        );
        // The source is left untouched
        assert!(tel.params.has("phone-context"));
    }

    #[test]
    fn test_strip_visual_separators() {
        assert_eq!(strip_visual_separators("+1-201-555-0123"), "+12015550123");
        assert_eq!(strip_visual_separators("863-1234"), "8631234");
        assert_eq!(strip_visual_separators("1+2"), "12");
    }

    #[test]
    fn test_uri_accessors_on_tel() {
        let mut uri = Uri::Tel(TelUri::new("7042"));
        assert_eq!(uri.scheme(), Scheme::Tel);
        assert!(uri.headers().is_none());
        assert!(!uri.is_encrypted());
        assert!(!uri.is_wildcard());
        assert!(matches!(uri.set_host("example.com"), Err(Error::NotApplicable(_))));
        assert!(matches!(uri.set_headers(Params::new()), Err(Error::NotApplicable(_))));

        uri.set_user("7043");
        assert_eq!(uri.user(), Some("7043"));
        uri.params_mut().add("phone-context", "example.com");
        assert_eq!(uri.to_string(), "tel:7043;phone-context=example.com");
    }

    #[test]
    fn test_uri_accessors_on_sip() {
        let mut uri = Uri::Sip(SipUri::sip("example.com"));
        uri.set_user("alice");
        uri.set_params(Params::new().with("lr", ""));
        uri.set_headers(Params::new().with("subject", "hi")).unwrap();
        assert_eq!(uri.to_string(), "sip:alice@example.com;lr?subject=hi");
        assert_eq!(uri.addr(), "sip:alice@example.com");
        assert!(uri.as_sip().is_some());
        assert!(uri.as_tel().is_none());
    }
}
