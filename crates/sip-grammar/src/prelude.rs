//! Commonly used types and parsers.
//!
//! The typed `From` header is not re-exported here so that a glob import
//! does not shadow `std::convert::From`; use
//! [`crate::types::addr_headers::From`] directly.
//!
//! ```rust
//! use sip_grammar::prelude::*;
//! ```

pub use crate::error::{Error, Result};
pub use crate::parser::address::{parse_address, parse_address_list, split_addresses};
pub use crate::parser::headers::parse_header;
pub use crate::parser::uri::{parse_sip_uri, parse_tel_uri, parse_uri};
pub use crate::types::addr_headers::{Contact, RecordRoute, ReferTo, ReferredBy, Route, To};
pub use crate::types::address::NameAddress;
pub use crate::types::call_id::CallId;
pub use crate::types::cseq::CSeq;
pub use crate::types::headers::{copy_headers, Header, HeaderName, Headers};
pub use crate::types::max_forwards::MaxForwards;
pub use crate::types::method::Method;
pub use crate::types::param::{Pair, Params};
pub use crate::types::uri::{Scheme, SipUri, TelUri, Uri};
pub use crate::types::via::{Via, ViaHop};
