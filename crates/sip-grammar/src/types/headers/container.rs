use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::parser::headers::parse_header;
use crate::types::addr_headers::{self, Contact, To};
use crate::types::call_id::CallId;
use crate::types::cseq::CSeq;
use crate::types::headers::{Header, HeaderName};
use crate::types::max_forwards::MaxForwards;
use crate::types::via::Via;

/// Position of the first materialized header of each frequently used kind.
///
/// `None` means "unknown": the next typed lookup scans the sequence again.
#[derive(Debug, Clone, Default)]
struct HeaderCache {
    via: Option<usize>,
    from: Option<usize>,
    to: Option<usize>,
    contact: Option<usize>,
    call_id: Option<usize>,
    cseq: Option<usize>,
    max_forwards: Option<usize>,
}

impl HeaderCache {
    fn slot_mut(&mut self, name: &HeaderName) -> Option<&mut Option<usize>> {
        match name {
            HeaderName::Via => Some(&mut self.via),
            HeaderName::From => Some(&mut self.from),
            HeaderName::To => Some(&mut self.to),
            HeaderName::Contact => Some(&mut self.contact),
            HeaderName::CallId => Some(&mut self.call_id),
            HeaderName::CSeq => Some(&mut self.cseq),
            HeaderName::MaxForwards => Some(&mut self.max_forwards),
            _ => None,
        }
    }

    fn slots_mut(&mut self) -> [&mut Option<usize>; 7] {
        [
            &mut self.via,
            &mut self.from,
            &mut self.to,
            &mut self.contact,
            &mut self.call_id,
            &mut self.cseq,
            &mut self.max_forwards,
        ]
    }
}

/// Generates a lazily-parsing typed accessor backed by a cache slot.
macro_rules! typed_accessor {
    ($(#[$meta:meta])* $fn_name:ident, $slot:ident, $variant:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(&mut self) -> Result<Option<&$ty>> {
            let pos = match self.cache.$slot {
                Some(pos) => Some(pos),
                None => {
                    let found = self.materialize_first(&HeaderName::$variant)?;
                    self.cache.$slot = found;
                    found
                }
            };
            Ok(match pos.and_then(|pos| self.order.get(pos)) {
                Some(Header::$variant(h)) => Some(h),
                _ => None,
            })
        }
    };
}

/// Ordered collection of the headers of one SIP message.
///
/// Headers keep their insertion order, which is also the rendering order.
/// Name lookups are case-insensitive and accept compact forms.
///
/// Raw headers added with [`Header::new`] are parsed only when one of the
/// typed accessors ([`Headers::via`], [`Headers::contact`], …) first asks
/// for them; the parsed value replaces the raw one in place and its position
/// is cached until the next mutation that could move it.
///
/// Mutation, including lazy parsing, needs `&mut self`; share a container
/// across tasks only behind external synchronization, or clone it.
///
/// # Examples
///
/// ```rust
/// use sip_grammar::types::headers::{Header, Headers};
///
/// let mut headers = Headers::new();
/// headers.append_header(Header::new("Via", "SIP/2.0/UDP 10.1.1.1:5060;branch=z9hG4bKabcdef"));
/// headers.append_header(Header::new("Contact", "<sip:alice@example.com>"));
///
/// let via = headers.via().unwrap().unwrap();
/// assert_eq!(via.branch(), Some("z9hG4bKabcdef"));
/// assert_eq!(
///     headers.to_string(),
///     "Via: SIP/2.0/UDP 10.1.1.1:5060;branch=z9hG4bKabcdef\r\nContact: <sip:alice@example.com>\r\n\r\n"
/// );
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Headers {
    order: Vec<Header>,
    #[serde(skip)]
    cache: HeaderCache,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Headers {
            order: Vec::with_capacity(capacity),
            cache: HeaderCache::default(),
        }
    }

    /// Adds a header after all existing ones.
    ///
    /// A cached "first header of this kind" stays valid, since the new
    /// header comes after it.
    pub fn append_header(&mut self, header: impl Into<Header>) {
        self.order.push(header.into());
    }

    /// Adds a header before all existing ones.
    ///
    /// Cached positions shift by one. If the header is a typed header of a
    /// cached kind it becomes that kind's cached instance; a raw one resets
    /// the slot so the next lookup parses it.
    pub fn prepend_header(&mut self, header: impl Into<Header>) {
        let header = header.into();
        for slot in self.cache.slots_mut() {
            if let Some(pos) = slot {
                *pos += 1;
            }
        }
        let typed = !header.is_raw();
        if let Some(slot) = self.cache.slot_mut(&header.header_name()) {
            *slot = if typed { Some(0) } else { None };
        }
        self.order.insert(0, header);
    }

    /// First header named `name`, in order.
    pub fn get_header(&self, name: &str) -> Option<&Header> {
        let name = HeaderName::from(name);
        self.order.iter().find(|h| matches_name(h, &name))
    }

    /// Every header named `name`, in order.
    pub fn get_headers(&self, name: &str) -> Vec<&Header> {
        let name = HeaderName::from(name);
        self.order.iter().filter(|h| matches_name(h, &name)).collect()
    }

    /// Removes every header named `name`, returning how many were removed.
    pub fn remove_header(&mut self, name: &str) -> usize {
        let name = HeaderName::from(name);
        let before = self.order.len();
        self.order.retain(|h| !matches_name(h, &name));
        let removed = before - self.order.len();
        if removed > 0 {
            self.clear_cache();
        }
        removed
    }

    /// Forgets every cached position; the next typed lookup rescans.
    pub fn clear_cache(&mut self) {
        self.cache = HeaderCache::default();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    typed_accessor!(
        /// The first `Via` header.
        via, via, Via, Via
    );

    typed_accessor!(
        /// The `From` header.
        from, from, From, addr_headers::From
    );

    typed_accessor!(
        /// The `To` header.
        to, to, To, To
    );

    typed_accessor!(
        /// The first `Contact` header.
        contact, contact, Contact, Contact
    );

    typed_accessor!(
        /// The `Call-ID` header.
        call_id, call_id, CallId, CallId
    );

    typed_accessor!(
        /// The `CSeq` header.
        cseq, cseq, CSeq, CSeq
    );

    typed_accessor!(
        /// The `Max-Forwards` header.
        max_forwards, max_forwards, MaxForwards, MaxForwards
    );

    /// Finds the first header called `name` that is, or parses into, a
    /// typed header.
    ///
    /// A header the parser keeps opaque (`lenient_parsing`) is skipped, so a
    /// later well-formed header of the same kind is used instead. Returns
    /// `None` when no header qualifies.
    fn materialize_first(&mut self, name: &HeaderName) -> Result<Option<usize>> {
        for pos in 0..self.order.len() {
            if self.order[pos].header_name() != *name {
                continue;
            }

            let parsed = match &self.order[pos] {
                Header::Other { name: raw_name, value } => {
                    parse_header(raw_name, value).map_err(|err| {
                        debug!(header = %raw_name, error = %err, "failed to parse header on access");
                        err
                    })?
                }
                _ => return Ok(Some(pos)),
            };
            if parsed.is_raw() {
                debug!(header = %name, position = pos, "header kept raw, trying the next one");
                continue;
            }
            self.order[pos] = parsed;
            return Ok(Some(pos));
        }
        Ok(None)
    }
}

fn matches_name(header: &Header, name: &HeaderName) -> bool {
    match (header, name) {
        (Header::Other { name: raw, .. }, wanted) => wanted.matches(raw),
        (typed, wanted) => typed.header_name() == *wanted,
    }
}

/// Appends clones of every header named `name` in `from` to `to`,
/// preserving their relative order.
///
/// ```rust
/// use sip_grammar::types::headers::{copy_headers, Header, Headers};
///
/// let mut request = Headers::new();
/// request.append_header(Header::new("Record-Route", "<sip:p1:5060;lr;transport=udp>"));
/// request.append_header(Header::new("Record-Route", "<sip:p2:5060;lr>"));
///
/// let mut response = Headers::new();
/// copy_headers("Record-Route", &request, &mut response);
/// let copied = response.get_headers("record-route");
/// assert_eq!(copied[0].to_string(), "Record-Route: <sip:p1:5060;lr;transport=udp>");
/// assert_eq!(copied[1].to_string(), "Record-Route: <sip:p2:5060;lr>");
/// ```
pub fn copy_headers(name: &str, from: &Headers, to: &mut Headers) {
    for header in from.get_headers(name) {
        to.append_header(header.clone());
    }
}

impl PartialEq for Headers {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for Headers {}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for header in &self.order {
            write!(f, "{}\r\n", header)?;
        }
        f.write_str("\r\n")
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<I: IntoIterator<Item = Header>>(iter: I) -> Self {
        Headers {
            order: iter.into_iter().collect(),
            cache: HeaderCache::default(),
        }
    }
}

impl Extend<Header> for Headers {
    fn extend<I: IntoIterator<Item = Header>>(&mut self, iter: I) {
        self.order.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
