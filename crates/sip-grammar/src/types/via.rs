//! # SIP Via Header
//!
//! The Via header records the path taken by a request
//! ([RFC 3261 §20.42](https://datatracker.ietf.org/doc/html/rfc3261#section-20.42)).
//! One header line may carry several comma-separated hops; [`Via`] keeps them
//! in wire order and [`ViaHop`] describes each one.
//!
//! ```text
//! Via: SIP/2.0/UDP pc33.atlanta.com:5060;branch=z9hG4bK776asdhds;received=192.0.2.1
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use sip_grammar::types::via::Via;
//! use std::str::FromStr;
//!
//! let via = Via::from_str("SIP/2.0/UDP 10.1.1.1:5060;branch=z9hG4bKabcdef").unwrap();
//! assert_eq!(via.len(), 1);
//! assert_eq!(via.branch(), Some("z9hG4bKabcdef"));
//! assert_eq!(via[0].host, "10.1.1.1");
//! assert_eq!(via.to_string(), "SIP/2.0/UDP 10.1.1.1:5060;branch=z9hG4bKabcdef");
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::headers::simple::parse_via;
use crate::types::param::Params;

/// One hop of a Via header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaHop {
    /// Protocol name, normally `SIP`
    pub protocol_name: String,
    /// Protocol version, normally `2.0`
    pub protocol_version: String,
    /// Transport token such as `UDP`, `TCP`, `TLS` or `WS`
    pub transport: String,
    /// sent-by host, IPv6 references keep their brackets
    pub host: String,
    /// sent-by port
    pub port: Option<u16>,
    /// `branch`, `received`, `rport` and friends
    pub params: Params,
}

impl ViaHop {
    /// Creates a `SIP/2.0` hop.
    pub fn new(transport: impl Into<String>, host: impl Into<String>) -> Self {
        ViaHop {
            protocol_name: "SIP".to_string(),
            protocol_version: "2.0".to_string(),
            transport: transport.into(),
            host: host.into(),
            port: None,
            params: Params::new(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(key, value);
        self
    }

    pub fn with_branch(self, branch: impl Into<String>) -> Self {
        self.with_param("branch", branch)
    }

    /// The `branch` parameter.
    pub fn branch(&self) -> Option<&str> {
        self.params.get("branch")
    }

    /// The `received` parameter.
    pub fn received(&self) -> Option<&str> {
        self.params.get("received")
    }

    /// `None` when `rport` is absent, `Some(None)` for a bare `;rport`.
    pub fn rport(&self) -> Option<Option<u16>> {
        self.params
            .get("rport")
            .map(|value| value.parse::<u16>().ok())
    }

    /// `SIP/2.0/UDP`
    pub fn sent_protocol(&self) -> String {
        format!(
            "{}/{}/{}",
            self.protocol_name, self.protocol_version, self.transport
        )
    }

    /// `host[:port]`
    pub fn sent_by(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

impl fmt::Display for ViaHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sent_protocol(), self.sent_by())?;
        for pair in &self.params {
            write!(f, ";{}", pair)?;
        }
        Ok(())
    }
}

/// Typed Via header: one or more hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Via(pub Vec<ViaHop>);

impl Via {
    /// A Via header with a single hop.
    pub fn new(hop: ViaHop) -> Self {
        Via(vec![hop])
    }

    /// The topmost hop.
    pub fn top(&self) -> Option<&ViaHop> {
        self.0.first()
    }

    /// `branch` of the topmost hop.
    pub fn branch(&self) -> Option<&str> {
        self.top().and_then(ViaHop::branch)
    }

    pub fn hops(&self) -> &[ViaHop] {
        &self.0
    }
}

impl Deref for Via {
    type Target = Vec<ViaHop>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Via {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hop) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", hop)?;
        }
        Ok(())
    }
}

impl FromStr for Via {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_via(s)
    }
}
