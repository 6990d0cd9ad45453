//! Parsers for SIP grammar elements.
//!
//! URIs and name-addrs are parsed by explicit state machines that consume a
//! prefix of the input per state; simple header values use `nom`. All of
//! them stop at the first error.

pub mod address;
pub mod headers;
pub(crate) mod params;
pub mod uri;
