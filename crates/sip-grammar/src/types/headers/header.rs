use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::headers::parse_header;
use crate::types::addr_headers::{self, Contact, RecordRoute, ReferTo, ReferredBy, Route, To};
use crate::types::call_id::CallId;
use crate::types::cseq::CSeq;
use crate::types::headers::HeaderName;
use crate::types::max_forwards::MaxForwards;
use crate::types::via::Via;

/// A single header field.
///
/// Known headers are held in their typed form; anything else, and known
/// headers that have not been parsed yet, is kept as raw text in
/// [`Header::Other`].
///
/// # Examples
///
/// ```rust
/// use sip_grammar::types::headers::{Header, HeaderName};
///
/// let raw = Header::new("Max-Forwards", "70");
/// assert!(raw.is_raw());
/// assert_eq!(raw.header_name(), HeaderName::MaxForwards);
///
/// let typed = Header::parse("Max-Forwards", "70").unwrap();
/// assert!(!typed.is_raw());
/// assert_eq!(typed.to_string(), "Max-Forwards: 70");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Header {
    Via(Via),
    From(addr_headers::From),
    To(To),
    Contact(Contact),
    Route(Route),
    RecordRoute(RecordRoute),
    ReferTo(ReferTo),
    ReferredBy(ReferredBy),
    CallId(CallId),
    CSeq(CSeq),
    MaxForwards(MaxForwards),
    /// Unparsed header, name spelled as received
    Other { name: String, value: String },
}

impl Header {
    /// Creates a raw header. Known names are parsed lazily by the
    /// container's typed accessors.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Header::Other {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses `value` with the parser registered for `name`.
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        parse_header(name, value)
    }

    /// The header's name.
    pub fn header_name(&self) -> HeaderName {
        match self {
            Header::Via(_) => HeaderName::Via,
            Header::From(_) => HeaderName::From,
            Header::To(_) => HeaderName::To,
            Header::Contact(_) => HeaderName::Contact,
            Header::Route(_) => HeaderName::Route,
            Header::RecordRoute(_) => HeaderName::RecordRoute,
            Header::ReferTo(_) => HeaderName::ReferTo,
            Header::ReferredBy(_) => HeaderName::ReferredBy,
            Header::CallId(_) => HeaderName::CallId,
            Header::CSeq(_) => HeaderName::CSeq,
            Header::MaxForwards(_) => HeaderName::MaxForwards,
            Header::Other { name, .. } => HeaderName::from(name.as_str()),
        }
    }

    /// The name as it is written on the wire: canonical for typed headers,
    /// as received for raw ones.
    pub fn name(&self) -> &str {
        match self {
            Header::Other { name, .. } => name,
            Header::Via(_) => "Via",
            Header::From(_) => "From",
            Header::To(_) => "To",
            Header::Contact(_) => "Contact",
            Header::Route(_) => "Route",
            Header::RecordRoute(_) => "Record-Route",
            Header::ReferTo(_) => "Refer-To",
            Header::ReferredBy(_) => "Referred-By",
            Header::CallId(_) => "Call-ID",
            Header::CSeq(_) => "CSeq",
            Header::MaxForwards(_) => "Max-Forwards",
        }
    }

    /// The header value rendered as text.
    pub fn value(&self) -> String {
        match self {
            Header::Via(h) => h.to_string(),
            Header::From(h) => h.to_string(),
            Header::To(h) => h.to_string(),
            Header::Contact(h) => h.to_string(),
            Header::Route(h) => h.to_string(),
            Header::RecordRoute(h) => h.to_string(),
            Header::ReferTo(h) => h.to_string(),
            Header::ReferredBy(h) => h.to_string(),
            Header::CallId(h) => h.to_string(),
            Header::CSeq(h) => h.to_string(),
            Header::MaxForwards(h) => h.to_string(),
            Header::Other { value, .. } => value.clone(),
        }
    }

    /// `true` for [`Header::Other`].
    pub fn is_raw(&self) -> bool {
        matches!(self, Header::Other { .. })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.value())
    }
}

macro_rules! header_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl ::std::convert::From<$ty> for Header {
                fn from(h: $ty) -> Self {
                    Header::$variant(h)
                }
            }
        )*
    };
}

header_from!(
    Via(Via),
    From(addr_headers::From),
    To(To),
    Contact(Contact),
    Route(Route),
    RecordRoute(RecordRoute),
    ReferTo(ReferTo),
    ReferredBy(ReferredBy),
    CallId(CallId),
    CSeq(CSeq),
    MaxForwards(MaxForwards),
);
