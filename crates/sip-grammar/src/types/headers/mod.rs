//! # SIP Headers
//!
//! Header fields and the ordered container that holds the headers of one
//! message.
//!
//! - [`HeaderName`]: case-insensitive names with compact forms
//! - [`Header`]: one header, typed or raw
//! - [`Headers`]: the ordered container with lazily parsed typed accessors
//!
//! A header is serialized as `Name: value`, and a container as its header
//! lines each ending in CRLF followed by the blank CRLF line that ends the
//! header section
//! ([RFC 3261 §7](https://datatracker.ietf.org/doc/html/rfc3261#section-7)).

mod container;
mod header;
mod header_name;

pub use container::{copy_headers, Headers};
pub use header::Header;
pub use header_name::HeaderName;
