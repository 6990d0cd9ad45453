// URI parsers for the sip:, sips: and tel: schemes.
//
// SIP-URI  = scheme ":" ["//"] [ userinfo "@" ] hostport [ ";" uri-parameters ] [ "?" headers ]
// TEL-URI  = "tel:" ["//"] telephone-subscriber *( ";" par )
//
// Both grammars are driven as explicit state machines: each state consumes a
// prefix of the remaining text, fills in the URI and names the next state.
// Parsing ends when a state returns no successor or an error.

use crate::error::{Error, Result};
use crate::parser::params::{TEL_PARAMS, URI_HEADERS, URI_PARAMS};
use crate::types::uri::{Scheme, SipUri, TelUri, Uri};

/// Bytes inspected when classifying a scheme: the longest scheme (`sips`)
/// plus its colon.
const SCHEME_PEEK: usize = 5;

/// `ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff`
const IPV6_MAX_TEXT: usize = 39;

/// Window in which the closing `]` is searched: 39 characters plus both
/// brackets plus one byte of margin.
const IPV6_SCAN_WINDOW: usize = 42;

/// Result of one state: the next state (or `None` when done) and the
/// unconsumed input.
type Step<'a, S> = Result<(Option<S>, &'a str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SipState {
    Scheme,
    Slashes,
    User,
    Host,
    HostIpv6,
    Port,
    UriParams,
    Headers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TelState {
    Scheme,
    Slashes,
    Number,
    Params,
}

/// Parses any supported URI, dispatching on its scheme.
///
/// The scheme is classified from the first few bytes only. A bare `*` is
/// accepted as the SIP wildcard.
///
/// # Errors
///
/// [`Error::EmptyInput`] for empty text, [`Error::UnsupportedScheme`] when
/// the scheme is not `sip`, `sips` or `tel`, or any error raised by the
/// scheme-specific parser.
pub fn parse_uri(input: &str) -> Result<Uri> {
    if input.is_empty() {
        return Err(Error::EmptyInput("URI".to_string()));
    }
    if input == "*" {
        return Ok(Uri::Sip(SipUri::wildcard()));
    }

    let scheme = input
        .bytes()
        .take(SCHEME_PEEK)
        .position(|b| b == b':')
        .and_then(|colon| Scheme::from_token(&input[..colon]));

    match scheme {
        Some(Scheme::Sip) | Some(Scheme::Sips) => parse_sip_uri(input).map(Uri::Sip),
        Some(Scheme::Tel) => parse_tel_uri(input).map(Uri::Tel),
        None => Err(Error::UnsupportedScheme(input.to_string())),
    }
}

/// Parses a `sip:` or `sips:` URI.
///
/// Follows [RFC 3261 §19.1.1](https://datatracker.ietf.org/doc/html/rfc3261#section-19.1.1):
/// `sip:user:password@host:port;uri-parameters?headers`. The host may be a
/// bracketed IPv6 reference, which is stored with its brackets and not
/// otherwise validated.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::parser::uri::parse_sip_uri;
///
/// let uri = parse_sip_uri("sip:alice@localhost:5060").unwrap();
/// assert_eq!(uri.user.as_deref(), Some("alice"));
/// assert_eq!(uri.host, "localhost");
/// assert_eq!(uri.port, Some(5060));
/// assert_eq!(uri.host_port(), "localhost:5060");
///
/// assert!(parse_sip_uri("sip:127.0.0.1:5060:5060;lr;transport=udp").is_err());
/// ```
pub fn parse_sip_uri(input: &str) -> Result<SipUri> {
    if input.is_empty() {
        return Err(Error::EmptyInput("SIP URI".to_string()));
    }

    let mut uri = SipUri::sip("");
    let mut state = Some(SipState::Scheme);
    let mut rest = input;

    while let Some(current) = state {
        let (next, remainder) = match current {
            SipState::Scheme => sip_scheme(&mut uri, rest)?,
            SipState::Slashes => {
                let (stripped, slashes) = strip_slashes(rest);
                uri.hierarchical_slashes = slashes;
                (Some(SipState::User), stripped)
            }
            SipState::User => sip_user(&mut uri, rest)?,
            SipState::Host => sip_host(&mut uri, rest)?,
            SipState::HostIpv6 => sip_host_ipv6(&mut uri, rest)?,
            SipState::Port => sip_port(&mut uri, rest)?,
            SipState::UriParams => sip_uri_params(&mut uri, rest)?,
            SipState::Headers => {
                URI_HEADERS.split_into(rest, &mut uri.headers);
                (None, "")
            }
        };
        state = next;
        rest = remainder;
    }

    Ok(uri)
}

/// Parses a `tel:` URI.
///
/// Follows [RFC 3966 §3](https://datatracker.ietf.org/doc/html/rfc3966#section-3).
/// The number may contain digits, `+`, `*`, `#` and the visual separators
/// `-`, `.`, `(` and `)`; parameters follow after `;`.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::parser::uri::parse_tel_uri;
///
/// let tel = parse_tel_uri("tel:863-1234;phone-context=+1-914-555").unwrap();
/// assert_eq!(tel.number, "863-1234");
/// assert_eq!(tel.params.get("phone-context"), Some("+1-914-555"));
/// ```
pub fn parse_tel_uri(input: &str) -> Result<TelUri> {
    if input.is_empty() {
        return Err(Error::EmptyInput("TEL URI".to_string()));
    }

    let mut uri = TelUri::new("");
    let mut state = Some(TelState::Scheme);
    let mut rest = input;

    while let Some(current) = state {
        let (next, remainder) = match current {
            TelState::Scheme => tel_scheme(rest)?,
            TelState::Slashes => {
                let (stripped, slashes) = strip_slashes(rest);
                uri.hierarchical_slashes = slashes;
                (Some(TelState::Number), stripped)
            }
            TelState::Number => tel_number(&mut uri, rest)?,
            TelState::Params => {
                TEL_PARAMS.split_into(rest, &mut uri.params);
                (None, "")
            }
        };
        state = next;
        rest = remainder;
    }

    Ok(uri)
}

/// Splits off the scheme token, returning it with the text after the colon.
fn split_scheme(s: &str) -> Result<(&str, &str)> {
    // Minimum meaningful URI is three bytes
    if s.len() < 3 {
        return Err(Error::MissingScheme(s.to_string()));
    }
    for (i, b) in s.bytes().take(SCHEME_PEEK).enumerate() {
        if b == b':' {
            return Ok((&s[..i], &s[i + 1..]));
        }
        if !b.is_ascii_alphabetic() {
            return Err(Error::InvalidScheme(s.to_string()));
        }
    }
    Err(Error::MissingScheme(s.to_string()))
}

fn strip_slashes(s: &str) -> (&str, bool) {
    match s.strip_prefix("//") {
        Some(stripped) => (stripped, true),
        None => (s, false),
    }
}

fn sip_scheme<'a>(uri: &mut SipUri, s: &'a str) -> Step<'a, SipState> {
    if s == "*" {
        uri.set_host("*");
        return Ok((None, ""));
    }

    let (token, rest) = split_scheme(s)?;
    match Scheme::from_token(token) {
        Some(scheme @ (Scheme::Sip | Scheme::Sips)) => {
            uri.scheme = scheme;
            Ok((Some(SipState::Slashes), rest))
        }
        _ => Err(Error::InvalidScheme(token.to_string())),
    }
}

fn sip_user<'a>(uri: &mut SipUri, s: &'a str) -> Step<'a, SipState> {
    let mut colon = None;
    for (i, b) in s.bytes().enumerate() {
        match b {
            // IPv6 reference starts before any '@': no userinfo
            b'[' => break,
            // The password starts after the last colon of the userinfo
            b':' => colon = Some(i),
            b'@' => {
                let (user, password) = match colon {
                    Some(c) => (&s[..c], Some(&s[c + 1..i])),
                    None => (&s[..i], None),
                };
                if user.is_empty() {
                    if password.is_some() {
                        return Err(Error::InvalidUserInfo(s[..i].to_string()));
                    }
                } else {
                    uri.user = Some(user.to_string());
                    uri.password = password.map(str::to_string);
                }
                return Ok((Some(SipState::Host), &s[i + 1..]));
            }
            _ => {}
        }
    }
    Ok((Some(SipState::Host), s))
}

fn sip_host<'a>(uri: &mut SipUri, s: &'a str) -> Step<'a, SipState> {
    if s.starts_with('[') {
        return Ok((Some(SipState::HostIpv6), s));
    }

    for (i, b) in s.bytes().enumerate() {
        let next = match b {
            b':' => SipState::Port,
            b';' => SipState::UriParams,
            b'?' => SipState::Headers,
            b'[' | b']' => return Err(Error::InvalidHost(s.to_string())),
            _ => continue,
        };
        set_host(uri, &s[..i])?;
        return Ok((Some(next), &s[i + 1..]));
    }

    set_host(uri, s)?;
    // Only a `*` that ends the input is the wildcard
    uri.wildcard = s == "*";
    Ok((None, ""))
}

fn set_host(uri: &mut SipUri, host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(Error::InvalidHost("empty host".to_string()));
    }
    uri.host = host.to_string();
    uri.wildcard = false;
    Ok(())
}

fn sip_host_ipv6<'a>(uri: &mut SipUri, s: &'a str) -> Step<'a, SipState> {
    let bytes = s.as_bytes();
    let window = bytes.len().min(IPV6_SCAN_WINDOW);
    let close = match bytes[..window].iter().position(|&b| b == b']') {
        // "[]" has nothing inside
        Some(1) => return Err(Error::IPv6NoClosingBracket(s.to_string())),
        Some(pos) => pos,
        None if bytes[window..].contains(&b']') => {
            return Err(Error::IPv6TooLong(s.to_string()))
        }
        None => return Err(Error::IPv6NoClosingBracket(s.to_string())),
    };
    if close - 1 > IPV6_MAX_TEXT {
        return Err(Error::IPv6TooLong(s.to_string()));
    }

    uri.set_host(&s[..=close]);

    let rest = &s[close + 1..];
    let next = match rest.bytes().next() {
        None => return Ok((None, "")),
        Some(b':') => SipState::Port,
        Some(b';') => SipState::UriParams,
        Some(b'?') => SipState::Headers,
        Some(_) => return Err(Error::InvalidHost(s.to_string())),
    };
    Ok((Some(next), &rest[1..]))
}

fn sip_port<'a>(uri: &mut SipUri, s: &'a str) -> Step<'a, SipState> {
    let (text, next, rest) = match s.find(|c: char| c == ';' || c == '?') {
        Some(i) if s.as_bytes()[i] == b';' => (&s[..i], Some(SipState::UriParams), &s[i + 1..]),
        Some(i) => (&s[..i], Some(SipState::Headers), &s[i + 1..]),
        None => (s, None, ""),
    };
    uri.port = parse_port(text)?;
    Ok((next, rest))
}

/// Parses a base-10 port; `0` means "not specified".
pub(crate) fn parse_port(text: &str) -> Result<Option<u16>> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidPort(text.to_string()));
    }
    let port: u16 = text
        .parse()
        .map_err(|_| Error::InvalidPort(text.to_string()))?;
    Ok(if port == 0 { None } else { Some(port) })
}

fn sip_uri_params<'a>(uri: &mut SipUri, s: &'a str) -> Step<'a, SipState> {
    let stop = URI_PARAMS.split_into(s, &mut uri.params);
    if stop < s.len() {
        // Stopped on '?'
        Ok((Some(SipState::Headers), &s[stop + 1..]))
    } else {
        Ok((None, ""))
    }
}

fn tel_scheme(s: &str) -> Step<'_, TelState> {
    let (token, rest) = split_scheme(s)?;
    match Scheme::from_token(token) {
        Some(Scheme::Tel) => Ok((Some(TelState::Slashes), rest)),
        _ => Err(Error::InvalidScheme(token.to_string())),
    }
}

fn is_tel_char(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'(' | b')' | b'*' | b'#')
}

fn tel_number<'a>(uri: &mut TelUri, s: &'a str) -> Step<'a, TelState> {
    let end = s.find(|c: char| c == ';' || c == '&').unwrap_or(s.len());
    let number = &s[..end];

    if number.is_empty() || !number.bytes().all(is_tel_char) {
        return Err(Error::InvalidTelNumber(number.to_string()));
    }
    uri.number = number.to_string();

    if end < s.len() {
        Ok((Some(TelState::Params), &s[end + 1..]))
    } else {
        Ok((None, ""))
    }
}
