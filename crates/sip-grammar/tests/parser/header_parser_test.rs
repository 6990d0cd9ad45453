// Header dispatch and container tests

use sip_grammar::{
    parser::headers::parse_header,
    types::addr_headers::{Contact, Route},
    types::headers::{copy_headers, Header, Headers},
    types::method::Method,
    types::via::{Via, ViaHop},
};
use std::str::FromStr;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sip_grammar=trace")
        .with_test_writer()
        .try_init();
}

fn invite_headers() -> Headers {
    let mut headers = Headers::new();
    headers.append_header(Header::new(
        "Via",
        "SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds",
    ));
    headers.append_header(Header::new("Max-Forwards", "70"));
    headers.append_header(Header::new("To", "Bob <sip:bob@biloxi.com>"));
    headers.append_header(Header::new("From", "Alice <sip:alice@atlanta.com>;tag=1928301774"));
    headers.append_header(Header::new("Call-ID", "a84b4c76e66710@pc33.atlanta.com"));
    headers.append_header(Header::new("CSeq", "314159 INVITE"));
    headers.append_header(Header::new("Contact", "<sip:alice@pc33.atlanta.com>"));
    headers
}

#[test]
fn test_typed_accessors_on_invite() {
    init_tracing();
    let mut headers = invite_headers();

    assert_eq!(headers.via().unwrap().unwrap().branch(), Some("z9hG4bK776asdhds"));
    assert_eq!(headers.max_forwards().unwrap().unwrap().value(), 70);
    assert_eq!(headers.to().unwrap().unwrap().display_name, "Bob");
    assert_eq!(headers.from().unwrap().unwrap().tag(), Some("1928301774"));
    assert_eq!(
        headers.call_id().unwrap().unwrap().as_str(),
        "a84b4c76e66710@pc33.atlanta.com"
    );
    let cseq = headers.cseq().unwrap().unwrap();
    assert_eq!((cseq.seq, &cseq.method), (314159, &Method::Invite));
    assert_eq!(headers.contact().unwrap().unwrap().len(), 1);

    // Materializing does not change the rendering
    assert_eq!(
        headers.to_string(),
        "Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
         Max-Forwards: 70\r\n\
         To: \"Bob\" <sip:bob@biloxi.com>\r\n\
         From: \"Alice\" <sip:alice@atlanta.com>;tag=1928301774\r\n\
         Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
         CSeq: 314159 INVITE\r\n\
         Contact: <sip:alice@pc33.atlanta.com>\r\n\
         \r\n"
    );
}

#[test]
fn test_prepend_keeps_via_lookup() {
    let mut headers = Headers::new();
    let via = Via::new(ViaHop::new("UDP", "10.0.0.1").with_port(5060).with_branch("z9hG4bK1"));
    headers.append_header(via.clone());
    headers.append_header(Header::new("From", "<sip:alice@atlanta.com>;tag=1"));
    headers.append_header(Header::new("To", "<sip:bob@biloxi.com>"));
    headers.prepend_header(Header::new("X-Prepended", "1"));

    let names: Vec<&str> = headers.iter().map(|h| h.name()).collect();
    assert_eq!(names, vec!["X-Prepended", "Via", "From", "To"]);
    assert_eq!(headers.get_header("via"), Some(&Header::Via(via.clone())));
    assert_eq!(headers.via().unwrap(), Some(&via));
}

#[test]
fn test_prepended_via_becomes_first() {
    let mut headers = Headers::new();
    headers.prepend_header(Header::new("Via", "SIP/2.0/UDP first.example.com"));
    assert_eq!(headers.len(), 1);

    let second = Via::new(ViaHop::new("TCP", "second.example.com"));
    headers.prepend_header(second.clone());
    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get_header("Via"), Some(&Header::Via(second.clone())));
    assert_eq!(headers.via().unwrap(), Some(&second));
}

#[test]
fn test_copy_headers() {
    let mut invite = invite_headers();
    invite.append_header(Header::new("Record-Route", "<sip:p1:5060;lr;transport=udp>"));
    invite.append_header(Header::new("Record-Route", "<sip:p2:5060;lr>"));

    let mut response = Headers::new();
    copy_headers("Record-Route", &invite, &mut response);

    let copied = response.get_headers("Record-Route");
    assert_eq!(copied.len(), 2);
    assert_eq!(copied[0].to_string(), "Record-Route: <sip:p1:5060;lr;transport=udp>");
    assert_eq!(copied[1].to_string(), "Record-Route: <sip:p2:5060;lr>");
}

#[test]
fn test_dispatch_produces_typed_headers() {
    init_tracing();
    let header = parse_header("Contact", "\"Mr. Watson\" <sip:watson@worcester.bell-telephone.com>;q=0.7; expires=3600, \"Mr. Watson\" <sip:watson@bell-telephone.com>;q=0.1")
        .expect("Failed to parse Contact");
    match header {
        Header::Contact(contact) => {
            assert_eq!(contact.len(), 2);
            assert_eq!(contact[0].params.get("expires"), Some("3600"));
        }
        other => panic!("expected Contact, got {:?}", other),
    }

    let header = parse_header("Route", "<sip:p1.example.com;lr>,<sip:p2.example.com;lr>").unwrap();
    assert_eq!(header.value(), "<sip:p1.example.com;lr>, <sip:p2.example.com;lr>");
}

#[test]
fn test_typed_header_from_str() {
    let contact = Contact::from_str("*").unwrap();
    assert!(contact.is_wildcard());

    let route = Route::from_str("<sip:p1.example.com;lr>").unwrap();
    assert_eq!(route[0].uri.host(), "p1.example.com");
}
