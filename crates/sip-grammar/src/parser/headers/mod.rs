//! Header value parsers and the name → parser registry.
//!
//! [`parse_header`] looks the header name up in a fixed table (long and
//! compact forms, any case) and runs the matching parser over the value.
//! Names without a parser produce a raw [`Header::Other`].
//!
//! With the `lenient_parsing` feature a value that fails to parse is kept as
//! a raw header instead of returning the error.

pub mod address;
pub mod simple;

use tracing::trace;

use crate::error::Result;
use crate::types::headers::{Header, HeaderName};

/// Parser for one header value.
pub type HeaderParser = fn(&str) -> Result<Header>;

fn via(value: &str) -> Result<Header> {
    simple::parse_via(value).map(Header::Via)
}

fn from(value: &str) -> Result<Header> {
    address::parse_from(value).map(Header::From)
}

fn to(value: &str) -> Result<Header> {
    address::parse_to(value).map(Header::To)
}

fn contact(value: &str) -> Result<Header> {
    address::parse_contact(value).map(Header::Contact)
}

fn route(value: &str) -> Result<Header> {
    address::parse_route(value).map(Header::Route)
}

fn record_route(value: &str) -> Result<Header> {
    address::parse_record_route(value).map(Header::RecordRoute)
}

fn refer_to(value: &str) -> Result<Header> {
    address::parse_refer_to(value).map(Header::ReferTo)
}

fn referred_by(value: &str) -> Result<Header> {
    address::parse_referred_by(value).map(Header::ReferredBy)
}

fn call_id(value: &str) -> Result<Header> {
    simple::parse_call_id(value).map(Header::CallId)
}

fn cseq(value: &str) -> Result<Header> {
    simple::parse_cseq(value).map(Header::CSeq)
}

fn max_forwards(value: &str) -> Result<Header> {
    simple::parse_max_forwards(value).map(Header::MaxForwards)
}

/// Registered parsers, keyed by canonical header name.
const HEADER_PARSERS: &[(&str, HeaderParser)] = &[
    ("Via", via),
    ("From", from),
    ("To", to),
    ("Contact", contact),
    ("Route", route),
    ("Record-Route", record_route),
    ("Refer-To", refer_to),
    ("Referred-By", referred_by),
    ("Call-ID", call_id),
    ("CSeq", cseq),
    ("Max-Forwards", max_forwards),
];

/// Returns the parser registered for `name`, if any.
///
/// Compact forms resolve to the parser of their long form.
pub fn lookup_parser(name: &str) -> Option<HeaderParser> {
    let canonical = HeaderName::from(name);
    if canonical.is_other() {
        return None;
    }
    HEADER_PARSERS
        .iter()
        .find(|(registered, _)| registered.eq_ignore_ascii_case(canonical.as_str()))
        .map(|(_, parser)| *parser)
}

/// Parses one header line that has already been split into name and value.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::parser::headers::parse_header;
/// use sip_grammar::types::headers::Header;
///
/// let header = parse_header("t", "\"Bob\" <sip:bob@biloxi.com>;tag=a6c85cf").unwrap();
/// match &header {
///     Header::To(to) => assert_eq!(to.tag(), Some("a6c85cf")),
///     other => panic!("unexpected header {:?}", other),
/// }
///
/// let header = parse_header("X-Custom", "anything").unwrap();
/// assert!(header.is_raw());
/// ```
pub fn parse_header(name: &str, value: &str) -> Result<Header> {
    let value = value.trim();
    let parser = match lookup_parser(name) {
        Some(parser) => parser,
        None => {
            trace!(header = name, "no parser registered, keeping raw value");
            return Ok(Header::new(name, value));
        }
    };

    trace!(header = name, "parsing header value");
    match parser(value) {
        Ok(header) => Ok(header),
        #[cfg(feature = "lenient_parsing")]
        Err(err) => {
            trace!(header = name, error = %err, "keeping malformed header raw");
            Ok(Header::new(name, value))
        }
        #[cfg(not(feature = "lenient_parsing"))]
        Err(err) => Err(err),
    }
}
