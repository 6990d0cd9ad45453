// Name-addr parsing (RFC 3261 §20.10) and address-list splitting.
//
// name-addr   = [ display-name ] LAQUOT addr-spec RAQUOT
// addr-spec   = SIP-URI / SIPS-URI / absoluteURI
// header      = ( name-addr / addr-spec ) *( SEMI generic-param )
//
// Without angle brackets every `;` parameter after the URI is a header
// parameter, not a URI parameter.

use crate::error::{Error, Result};
use crate::parser::params::HEADER_PARAMS;
use crate::parser::uri::parse_uri;
use crate::types::address::NameAddress;
use crate::types::param::Params;
use crate::types::uri::{SipUri, Uri};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddrState {
    DisplayName,
    DisplayNameQuoted,
    UriBracket,
    Uri,
    HeaderParams,
}

/// Fields collected while the state machine runs.
#[derive(Default)]
struct Builder {
    display_name: String,
    uri: Option<Uri>,
    params: Params,
}

type Step<'a> = Result<(Option<AddrState>, &'a str)>;

/// Parses a single name-addr or addr-spec with trailing header parameters.
///
/// Commas are not interpreted; use [`parse_address_list`] for header values
/// that may carry several addresses.
///
/// # Errors
///
/// [`Error::EmptyInput`] for empty text, an address-grammar error
/// ([`Error::UnterminatedQuote`], [`Error::InvalidEscape`],
/// [`Error::NoUriAfterDisplayName`], [`Error::NoUriPresent`],
/// [`Error::InvalidUriMissingEndBracket`]) or any error from the URI parser.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::parser::address::parse_address;
///
/// let addr = parse_address("\"Bob\" <sips:bob:password@127.0.0.1:5060;user=phone>;tag=1234").unwrap();
/// assert_eq!(addr.display_name, "Bob");
/// assert_eq!(addr.uri.to_string(), "sips:bob:password@127.0.0.1:5060;user=phone");
/// assert_eq!(addr.params.to_string(), "tag=1234");
/// assert!(addr.uri.is_encrypted());
///
/// // Without brackets the parameters belong to the header
/// let addr = parse_address("sip:1215174826@222.222.222.222;tag=9300025590389559597").unwrap();
/// assert!(addr.uri.params().is_empty());
/// assert_eq!(addr.tag(), Some("9300025590389559597"));
/// ```
pub fn parse_address(input: &str) -> Result<NameAddress> {
    if input.is_empty() {
        return Err(Error::EmptyInput("address".to_string()));
    }

    let mut builder = Builder::default();
    let mut state = Some(AddrState::DisplayName);
    let mut rest = input;

    while let Some(current) = state {
        let (next, remainder) = match current {
            AddrState::DisplayName => display_name(&mut builder, rest),
            AddrState::DisplayNameQuoted => display_name_quoted(&mut builder, rest)?,
            AddrState::UriBracket => uri_bracket(&mut builder, rest)?,
            AddrState::Uri => uri_plain(&mut builder, rest)?,
            AddrState::HeaderParams => {
                HEADER_PARAMS.split_into(rest, &mut builder.params);
                (None, "")
            }
        };
        state = next;
        rest = remainder;
    }

    // Every terminal path sets the URI; an unset URI means none was found.
    let uri = builder
        .uri
        .ok_or_else(|| Error::NoUriPresent(input.to_string()))?;
    Ok(NameAddress {
        display_name: builder.display_name,
        uri,
        params: builder.params,
    })
}

/// Parses a header value holding exactly one address.
///
/// # Errors
///
/// [`Error::MultipleAddressesUnexpected`] if the value contains a comma
/// outside quotes and angle brackets, otherwise as [`parse_address`].
pub fn parse_single_address(input: &str) -> Result<NameAddress> {
    if find_top_level_comma(input).is_some() {
        return Err(Error::MultipleAddressesUnexpected(input.to_string()));
    }
    parse_address(input.trim())
}

/// Parses a comma-separated list of addresses, as carried by `Contact`,
/// `Route` and `Record-Route`.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::parser::address::parse_address_list;
///
/// let list = parse_address_list(
///     "\"Mr. Watson\" <sip:watson@worcester.bell-telephone.com>;q=0.7; expires=3600, \
///      \"Watson, T.\" <sip:watson@bell-telephone.com>;q=0.1",
/// )
/// .unwrap();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list[1].display_name, "Watson, T.");
/// assert_eq!(list[0].params.get("expires"), Some("3600"));
/// ```
pub fn parse_address_list(input: &str) -> Result<Vec<NameAddress>> {
    split_addresses(input).into_iter().map(parse_address).collect()
}

/// Splits a header value on commas that sit outside quoted strings and
/// angle brackets. Segments are trimmed; end of input terminates the last
/// segment.
pub fn split_addresses(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = input;
    while let Some(comma) = find_top_level_comma(rest) {
        segments.push(rest[..comma].trim());
        rest = &rest[comma + 1..];
    }
    segments.push(rest.trim());
    segments
}

/// Offset of the first comma outside quotes and angle brackets.
pub(crate) fn find_top_level_comma(input: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;

    for (i, b) in input.bytes().enumerate() {
        if in_quotes {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_quotes = true,
            b'<' => in_brackets = true,
            b'>' => in_brackets = false,
            b',' if !in_brackets => return Some(i),
            _ => {}
        }
    }
    None
}

fn display_name<'a>(builder: &mut Builder, s: &'a str) -> (Option<AddrState>, &'a str) {
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'"' => return (Some(AddrState::DisplayNameQuoted), &s[i + 1..]),
            b'<' => {
                builder.display_name = s[..i].trim().to_string();
                return (Some(AddrState::UriBracket), &s[i + 1..]);
            }
            // addr-spec without brackets; the URI state splits off the params
            b';' => return (Some(AddrState::Uri), s),
            _ => {}
        }
    }
    (Some(AddrState::Uri), s)
}

fn display_name_quoted<'a>(builder: &mut Builder, s: &'a str) -> Step<'a> {
    let mut name = String::with_capacity(s.len());
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            if c == '\r' || c == '\n' {
                return Err(Error::InvalidEscape(format!("{:?} in {}", c, s)));
            }
            name.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                builder.display_name = name;
                let after = &s[i + 1..];
                return match after.find(|c: char| c == '<' || c == ';') {
                    Some(j) if after.as_bytes()[j] == b'<' => {
                        Ok((Some(AddrState::UriBracket), &after[j + 1..]))
                    }
                    Some(j) => Ok((Some(AddrState::Uri), &after[j + 1..])),
                    None => Err(Error::NoUriAfterDisplayName(s.to_string())),
                };
            }
            _ => name.push(c),
        }
    }

    Err(Error::UnterminatedQuote(s.to_string()))
}

fn uri_bracket<'a>(builder: &mut Builder, s: &'a str) -> Step<'a> {
    if s.is_empty() {
        return Err(Error::NoUriPresent("nothing after '<'".to_string()));
    }
    let close = s
        .find('>')
        .ok_or_else(|| Error::InvalidUriMissingEndBracket(s.to_string()))?;

    let text = &s[..close];
    if text.trim().is_empty() {
        return Err(Error::NoUriPresent("empty angle brackets".to_string()));
    }
    builder.uri = Some(parse_uri(text)?);
    Ok((Some(AddrState::HeaderParams), &s[close + 1..]))
}

fn uri_plain<'a>(builder: &mut Builder, s: &'a str) -> Step<'a> {
    let (text, params) = match s.find(';') {
        Some(i) => (s[..i].trim(), Some(&s[i + 1..])),
        None => (s.trim(), None),
    };
    if text.is_empty() {
        return Err(Error::NoUriPresent(s.to_string()));
    }

    builder.uri = Some(if text == "*" {
        Uri::Sip(SipUri::wildcard())
    } else {
        parse_uri(text)?
    });

    Ok(match params {
        Some(rest) => (Some(AddrState::HeaderParams), rest),
        None => (None, ""),
    })
}
