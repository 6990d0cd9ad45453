// Parsers for the non-address headers: Via, CSeq, Max-Forwards and Call-ID.
//
// Via          = sent-protocol LWS sent-by *( SEMI via-params )
// sent-protocol= protocol-name SLASH protocol-version SLASH transport
// CSeq         = 1*DIGIT LWS Method
// Max-Forwards = 1*DIGIT
// Call-ID      = word [ "@" word ]

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::parser::address::split_addresses;
use crate::parser::params::HEADER_PARAMS;
use crate::types::call_id::CallId;
use crate::types::cseq::CSeq;
use crate::types::max_forwards::MaxForwards;
use crate::types::method::is_token_char;
use crate::types::param::Params;
use crate::types::via::{Via, ViaHop};

type ParseResult<'a, T> = IResult<&'a str, T>;

fn token(input: &str) -> ParseResult<'_, &str> {
    take_while1(|c: char| c.is_ascii() && is_token_char(c as u8))(input)
}

fn slash(input: &str) -> ParseResult<'_, char> {
    delimited(space0, char('/'), space0)(input)
}

fn sent_protocol(input: &str) -> ParseResult<'_, (&str, &str, &str)> {
    tuple((token, preceded(slash, token), preceded(slash, token)))(input)
}

fn sent_by_host(input: &str) -> ParseResult<'_, &str> {
    alt((
        recognize(delimited(char('['), take_while1(|c: char| c != ']'), char(']'))),
        take_while1(|c: char| !matches!(c, ':' | ';' | ',' | ' ' | '\t' | '[' | ']')),
    ))(input)
}

fn port(input: &str) -> ParseResult<'_, u16> {
    map_res(digit1, |digits: &str| digits.parse::<u16>())(input)
}

fn number(input: &str) -> ParseResult<'_, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

/// Parses one `sent-protocol sent-by *(;param)` hop.
fn parse_via_hop(input: &str) -> Result<ViaHop> {
    let (rest, ((name, version, transport), _, host, port)) =
        tuple((sent_protocol, space1, sent_by_host, opt(preceded(char(':'), port))))(input)?;

    let mut params = Params::new();
    let rest = rest.trim_start();
    if !rest.is_empty() {
        let rest = rest.strip_prefix(';').ok_or_else(|| {
            Error::InvalidHeader(format!("unexpected text after Via sent-by: {:?}", rest))
        })?;
        HEADER_PARAMS.split_into(rest, &mut params);
    }

    Ok(ViaHop {
        protocol_name: name.to_string(),
        protocol_version: version.to_string(),
        transport: transport.to_string(),
        host: host.to_string(),
        port,
        params,
    })
}

/// Parses a Via value with one or more comma-separated hops.
pub fn parse_via(value: &str) -> Result<Via> {
    let hops = split_addresses(value)
        .into_iter()
        .map(|hop| {
            if hop.is_empty() {
                Err(Error::InvalidHeader("empty Via hop".to_string()))
            } else {
                parse_via_hop(hop)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Via(hops))
}

/// Parses a CSeq value such as `314159 INVITE`.
pub fn parse_cseq(value: &str) -> Result<CSeq> {
    let (_, (seq, method)) = all_consuming(delimited(
        space0,
        separated_pair(number, space1, token),
        space0,
    ))(value)?;
    Ok(CSeq::new(seq, method.parse()?))
}

/// Parses a Max-Forwards value.
pub fn parse_max_forwards(value: &str) -> Result<MaxForwards> {
    let (_, hops) = all_consuming(delimited(space0, number, space0))(value)?;
    Ok(MaxForwards(hops))
}

/// Parses a Call-ID value; any run of non-whitespace is accepted.
pub fn parse_call_id(value: &str) -> Result<CallId> {
    let parsed: ParseResult<'_, &str> = all_consuming(delimited(
        space0,
        take_while1(|c: char| !c.is_whitespace()),
        space0,
    ))(value);
    let (_, id) = parsed?;
    Ok(CallId::new(id))
}
