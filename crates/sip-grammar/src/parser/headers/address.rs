// Parsers for the address-bearing headers.

use crate::error::{Error, Result};
use crate::parser::address::{parse_address_list, parse_single_address};
use crate::types::addr_headers::{Contact, From, RecordRoute, ReferTo, ReferredBy, Route, To};
use crate::types::address::NameAddress;

/// Single address in a header where `*` is meaningless.
fn no_wildcard(header: &str, value: &str) -> Result<NameAddress> {
    let address = parse_single_address(value)?;
    if address.is_wildcard() {
        return Err(Error::WildcardNotPermitted(header.to_string()));
    }
    Ok(address)
}

/// Parses a `From` value; `*` is rejected.
pub fn parse_from(value: &str) -> Result<From> {
    no_wildcard("From", value).map(From)
}

/// Parses a `To` value; `*` is rejected.
pub fn parse_to(value: &str) -> Result<To> {
    no_wildcard("To", value).map(To)
}

/// Parses a `Referred-By` value; `*` is rejected.
pub fn parse_referred_by(value: &str) -> Result<ReferredBy> {
    no_wildcard("Referred-By", value).map(ReferredBy)
}

/// Parses a `Refer-To` value.
pub fn parse_refer_to(value: &str) -> Result<ReferTo> {
    parse_single_address(value).map(ReferTo)
}

/// Parses a `Contact` value, which may list several addresses or be `*`.
pub fn parse_contact(value: &str) -> Result<Contact> {
    parse_address_list(value).map(Contact)
}

/// Parses a `Route` value.
pub fn parse_route(value: &str) -> Result<Route> {
    parse_address_list(value).map(Route)
}

/// Parses a `Record-Route` value.
pub fn parse_record_route(value: &str) -> Result<RecordRoute> {
    parse_address_list(value).map(RecordRoute)
}
