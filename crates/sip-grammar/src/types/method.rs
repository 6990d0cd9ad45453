//! SIP request methods, as carried in the `CSeq` header.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A SIP request method.
///
/// Method names are case-sensitive
/// ([RFC 3261 §7.1](https://datatracker.ietf.org/doc/html/rfc3261#section-7.1)),
/// so `invite` is an extension method rather than [`Method::Invite`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Invite,
    Ack,
    Bye,
    Cancel,
    Register,
    Options,
    Info,
    Update,
    Message,
    Prack,
    Refer,
    Subscribe,
    Notify,
    Publish,
    /// Any other token
    Extension(String),
}

const STANDARD_METHODS: &[(&str, Method)] = &[
    ("INVITE", Method::Invite),
    ("ACK", Method::Ack),
    ("BYE", Method::Bye),
    ("CANCEL", Method::Cancel),
    ("REGISTER", Method::Register),
    ("OPTIONS", Method::Options),
    ("INFO", Method::Info),
    ("UPDATE", Method::Update),
    ("MESSAGE", Method::Message),
    ("PRACK", Method::Prack),
    ("REFER", Method::Refer),
    ("SUBSCRIBE", Method::Subscribe),
    ("NOTIFY", Method::Notify),
    ("PUBLISH", Method::Publish),
];

impl Method {
    /// The method token.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Extension(token) => token,
            standard => STANDARD_METHODS
                .iter()
                .find(|(_, m)| m == standard)
                .map(|(name, _)| *name)
                .unwrap_or_default(),
        }
    }
}

/// RFC 3261 `token` characters.
pub(crate) fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'-' | b'.' | b'!' | b'%' | b'*' | b'_' | b'+' | b'`' | b'\'' | b'~')
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some((_, method)) = STANDARD_METHODS.iter().find(|(name, _)| *name == s) {
            return Ok(method.clone());
        }
        if s.is_empty() || !s.bytes().all(is_token_char) {
            return Err(Error::InvalidHeader(format!("invalid method: {:?}", s)));
        }
        Ok(Method::Extension(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
