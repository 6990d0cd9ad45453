// Name-addr parser tests

use std::str::FromStr;

use sip_grammar::{
    error::Error,
    parser::address::{parse_address, parse_address_list, split_addresses},
    types::address::NameAddress,
    types::uri::Scheme,
};

#[test]
fn test_parse_address_scenario() {
    let addr = parse_address("\"Bob\" <sips:bob:password@127.0.0.1:5060;user=phone>;tag=1234")
        .expect("Failed to parse name-addr");

    assert_eq!(addr.display_name, "Bob");
    assert_eq!(addr.uri.to_string(), "sips:bob:password@127.0.0.1:5060;user=phone");
    assert_eq!(addr.params.to_string(), "tag=1234");
    assert!(addr.uri.is_encrypted());
    assert!(!addr.is_wildcard());
}

#[test]
fn test_parse_wildcard_scenario() {
    let addr = parse_address("*").expect("Failed to parse wildcard");
    let uri = addr.uri.as_sip().expect("wildcard is a SIP URI");
    assert_eq!(uri.host, "*");
    assert!(uri.wildcard);
    assert_eq!(addr.display_name, "");
}

#[test]
fn test_unbracketed_params_are_header_params() {
    let addr = NameAddress::from_str("sip:alice@atlanta.com;transport=tcp;tag=abc").unwrap();
    assert!(addr.uri.params().is_empty());
    assert_eq!(addr.params.get("transport"), Some("tcp"));
    assert_eq!(addr.tag(), Some("abc"));

    let addr = NameAddress::from_str("<sip:alice@atlanta.com;transport=tcp>;tag=abc").unwrap();
    assert_eq!(addr.uri.params().get("transport"), Some("tcp"));
    assert_eq!(addr.params.len(), 1);
}

#[test]
fn test_rendering_round_trip() {
    for input in [
        "\"Bob\" <sips:bob:password@127.0.0.1:5060;user=phone>;tag=1234",
        "<sip:alice@atlanta.com>;tag=88sja8x;expires=3600",
        "\"Escaped \\\"name\\\"\" <tel:+1-201-555-0123;phone-context=example.com>",
        "*",
    ] {
        let addr = parse_address(input).expect(input);
        let rendered = addr.to_string();
        assert_eq!(rendered, input);
        assert_eq!(parse_address(&rendered).unwrap(), addr);
    }
}

#[test]
fn test_bare_uri_renders_with_brackets() {
    let addr = parse_address("sip:carol@chicago.com;tag=1").unwrap();
    assert_eq!(addr.to_string(), "<sip:carol@chicago.com>;tag=1");
}

#[test]
fn test_tel_address() {
    let addr = parse_address("tel:+121-517-4826").unwrap();
    assert_eq!(addr.uri.scheme(), Scheme::Tel);
    assert_eq!(addr.uri.user(), Some("+121-517-4826"));
}

#[test]
fn test_address_errors() {
    assert!(matches!(parse_address(""), Err(Error::EmptyInput(_))));
    assert!(matches!(parse_address("\"open"), Err(Error::UnterminatedQuote(_))));
    assert!(matches!(parse_address("\"name\""), Err(Error::NoUriAfterDisplayName(_))));
    assert!(matches!(
        parse_address("<sip:bob@biloxi.com"),
        Err(Error::InvalidUriMissingEndBracket(_))
    ));
    assert!(matches!(parse_address("Bob <"), Err(Error::NoUriPresent(_))));
    assert!(matches!(
        parse_address("<sip:127.0.0.1:5060:5060;lr;transport=udp>"),
        Err(Error::InvalidPort(_))
    ));
}

#[test]
fn test_address_list_with_commas_in_quotes() {
    let input = "\"Watson, Thomas\" <sip:watson@bell.com>;q=0.7, <sip:holmes@baker.st;lr>";
    assert_eq!(split_addresses(input).len(), 2);

    let list = parse_address_list(input).unwrap();
    assert_eq!(list[0].display_name, "Watson, Thomas");
    assert_eq!(list[0].params.get("q"), Some("0.7"));
    assert!(list[1].uri.params().has("lr"));
}

#[test]
fn test_bracketed_star_host_keeps_uri_params() {
    let input = "<sip:*;lr>;foo=1";
    let addr = parse_address(input).unwrap();
    assert!(!addr.is_wildcard());
    assert!(addr.uri.params().has("lr"));
    assert_eq!(addr.to_string(), input);
    assert_eq!(parse_address(&addr.to_string()).unwrap(), addr);
}
