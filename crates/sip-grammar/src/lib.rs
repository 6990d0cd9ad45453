//! # sip-grammar
//!
//! Grammar engine for the addressing layer of SIP: parsing and rendering of
//! `sip:`, `sips:` and `tel:` URIs, name-addr values, header parameters and
//! the ordered header container of a SIP message.
//!
//! The crate works on text that has already been framed into header names
//! and values; it performs no I/O.
//!
//! ## Modules
//!
//! - [`types`]: the values ([`Uri`], [`NameAddress`], [`Params`], [`Header`],
//!   [`Headers`], typed headers)
//! - [`parser`]: the state-machine parsers producing those values
//! - [`error`]: the [`Error`] type shared by every parser
//!
//! ## Example
//!
//! ```rust
//! use sip_grammar::prelude::*;
//! use std::str::FromStr;
//!
//! let uri = Uri::from_str("sip:alice@atlanta.com:5060;transport=tcp").unwrap();
//! assert_eq!(uri.user(), Some("alice"));
//!
//! let to = To::from_str("\"Bob\" <sips:bob@biloxi.com>;tag=a6c85cf").unwrap();
//! assert!(to.uri.is_encrypted());
//!
//! let mut headers = Headers::new();
//! headers.append_header(Header::new("To", "\"Bob\" <sips:bob@biloxi.com>;tag=a6c85cf"));
//! assert_eq!(headers.to().unwrap().unwrap().tag(), Some("a6c85cf"));
//! ```
//!
//! ## Features
//!
//! - `lenient_parsing`: keep malformed values of known headers as raw
//!   headers instead of failing

pub mod error;
pub mod parser;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
pub use types::address::NameAddress;
pub use types::headers::{Header, HeaderName, Headers};
pub use types::param::{Pair, Params};
pub use types::uri::{Scheme, SipUri, TelUri, Uri};
