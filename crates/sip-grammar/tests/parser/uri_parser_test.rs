// URI parser tests: sip:, sips: and tel: through the public API

use std::str::FromStr;

use sip_grammar::{
    error::Error,
    parser::uri::{parse_sip_uri, parse_tel_uri, parse_uri},
    types::uri::{Scheme, SipUri, TelUri, Uri},
};

#[test]
fn test_parse_sip_uri_scenario() {
    let uri = parse_sip_uri("sip:alice@localhost:5060").expect("Failed to parse basic SIP URI");
    assert_eq!(uri.user.as_deref(), Some("alice"), "User part should be 'alice'");
    assert_eq!(uri.host, "localhost", "Host should be 'localhost'");
    assert_eq!(uri.port, Some(5060), "Port should be 5060");
    assert_eq!(uri.host_port(), "localhost:5060");
    assert_eq!(uri.endpoint(), "alice@localhost:5060");
}

#[test]
fn test_parse_sip_uri_variants() {
    let uri = Uri::from_str("sip:example.com").expect("Failed to parse URI without user part");
    assert_eq!(uri.scheme(), Scheme::Sip);
    assert_eq!(uri.user(), None, "User part should be None");
    assert_eq!(uri.host(), "example.com");

    let uri = Uri::from_str("sip:user@example.com;transport=tcp;ttl=5")
        .expect("Failed to parse URI with parameters");
    assert_eq!(uri.params().get("transport"), Some("tcp"));
    assert_eq!(uri.params().get("ttl"), Some("5"));

    let uri = Uri::from_str("sip:user@example.com?subject=Meeting&priority=urgent")
        .expect("Failed to parse URI with headers");
    let headers = uri.headers().expect("SIP URIs carry headers");
    assert_eq!(headers.len(), 2, "URI should have 2 headers");
    assert_eq!(headers.get("subject"), Some("Meeting"));
    assert_eq!(headers.get("priority"), Some("urgent"));

    let uri = Uri::from_str("sips:secure@example.com").expect("Failed to parse SIPS URI");
    assert_eq!(uri.scheme(), Scheme::Sips, "URI scheme should be SIPS");
    assert!(uri.is_encrypted());

    let uri = Uri::from_str("sip:user@192.0.2.1").expect("Failed to parse IPv4 URI");
    assert_eq!(uri.host(), "192.0.2.1");

    let uri = Uri::from_str("sip:user@[2001:db8::1]:5060").expect("Failed to parse IPv6 URI");
    assert_eq!(uri.host(), "[2001:db8::1]");
    assert_eq!(uri.as_sip().and_then(|u| u.port), Some(5060));
}

#[test]
fn test_parse_sip_uri_full() {
    let input = "sips:bob:password@127.0.0.1:5060;user=phone;lr?subject=project%20x&priority=urgent";
    let uri = parse_sip_uri(input).expect("Failed to parse full SIPS URI");

    assert_eq!(uri.scheme, Scheme::Sips);
    assert_eq!(uri.user.as_deref(), Some("bob"));
    assert_eq!(uri.password.as_deref(), Some("password"));
    assert_eq!(uri.host, "127.0.0.1");
    assert_eq!(uri.port, Some(5060));
    assert_eq!(uri.params.keys().collect::<Vec<_>>(), vec!["user", "lr"]);
    assert_eq!(uri.headers.keys().collect::<Vec<_>>(), vec!["subject", "priority"]);
    assert_eq!(uri.to_string(), input);
    assert_eq!(uri.addr(), "sips:bob@127.0.0.1:5060");
}

#[test]
fn test_scheme_is_rendered_lowercase() {
    let uri = parse_sip_uri("SIP:alice@atlanta.com").unwrap();
    assert_eq!(uri.to_string(), "sip:alice@atlanta.com");
    assert_eq!(parse_sip_uri(&uri.to_string()).unwrap(), uri);
}

#[test]
fn test_invalid_sip_uris() {
    assert!(matches!(
        parse_sip_uri("sip:127.0.0.1:5060:5060;lr;transport=udp"),
        Err(Error::InvalidPort(_))
    ));
    assert!(matches!(parse_sip_uri("alice@atlanta.com"), Err(Error::MissingScheme(_))));
    assert!(matches!(parse_sip_uri("http://example.com"), Err(Error::InvalidScheme(_))));
    assert!(matches!(parse_sip_uri(""), Err(Error::EmptyInput(_))));
    assert!(matches!(parse_sip_uri("sip:"), Err(Error::InvalidHost(_))));
    assert!(matches!(
        parse_sip_uri("sip:[fe80::dc45:996b:6de9:9746:ffff:ffff:ffff:ffff]"),
        Err(Error::IPv6TooLong(_))
    ));
    assert!(matches!(parse_sip_uri("sip:[::1"), Err(Error::IPv6NoClosingBracket(_))));
}

#[test]
fn test_ipv6_bounds() {
    assert!(parse_sip_uri("sip:[::1]").is_ok());
    assert!(parse_sip_uri("sip:[ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff]").is_ok());
    assert!(parse_sip_uri("sip:[ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff]").is_err());
}

#[test]
fn test_parse_uri_dispatch() {
    assert!(matches!(parse_uri("sip:a@b"), Ok(Uri::Sip(_))));
    assert!(matches!(parse_uri("tel:+1234"), Ok(Uri::Tel(_))));
    assert!(matches!(parse_uri("*"), Ok(Uri::Sip(ref u)) if u.wildcard));
    assert!(matches!(parse_uri("urn:service:sos"), Err(Error::UnsupportedScheme(_))));
}

#[test]
fn test_tel_to_sip_scenario() {
    let tel = parse_tel_uri("tel:+1-201-555-0123;phone-context=example.com")
        .expect("Failed to parse TEL URI");
    assert_eq!(tel.number, "+1-201-555-0123");

    let sip = tel.to_sip_uri().expect("phone-context is present");
    assert_eq!(sip.to_string(), "sip:+12015550123@example.com;user-context=phone");
    assert_eq!(sip.host, "example.com");
}

#[test]
fn test_tel_to_sip_without_context() {
    let tel = TelUri::from_str("tel:+1-201-555-0123").unwrap();
    assert!(matches!(SipUri::try_from(&tel), Err(Error::MissingPhoneContext(_))));
}

#[test]
fn test_tel_round_trip() {
    let input = "tel:863-1234;phone-context=+1-914-555;ext=22";
    let tel = TelUri::from_str(input).unwrap();
    assert_eq!(tel.to_string(), input);
    assert_eq!(tel.addr(), "tel:863-1234");
}

#[test]
fn test_invalid_tel_uris() {
    assert!(matches!(parse_tel_uri("tel:555-CALL"), Err(Error::InvalidTelNumber(_))));
    assert!(matches!(parse_tel_uri("tel:"), Err(Error::InvalidTelNumber(_))));
    assert!(matches!(parse_tel_uri("te"), Err(Error::MissingScheme(_))));
}

#[test]
fn test_star_host_round_trips_in_full() {
    for input in ["sips:*", "sip:alice@*;transport=udp", "sip://*", "sip:*:5060"] {
        let uri = parse_sip_uri(input).expect(input);
        assert!(!uri.is_bare_wildcard(), "{} is not the bare wildcard", input);
        let rendered = uri.to_string();
        assert_eq!(rendered, input);
        assert_eq!(parse_sip_uri(&rendered).unwrap(), uri);
    }

    let uri = parse_sip_uri("sip:*").unwrap();
    assert!(uri.is_bare_wildcard());
    assert_eq!(uri.to_string(), "*");
    assert_eq!(parse_sip_uri("*").unwrap(), uri);
}

#[test]
fn test_password_requires_user() {
    assert!(matches!(
        parse_sip_uri("sip::secret@atlanta.com"),
        Err(Error::InvalidUserInfo(_))
    ));
}
