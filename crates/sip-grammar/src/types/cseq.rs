//! CSeq header ([RFC 3261 §20.16](https://datatracker.ietf.org/doc/html/rfc3261#section-20.16)).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::headers::simple::parse_cseq;
use crate::types::method::Method;

/// Sequence number and method, e.g. `CSeq: 314159 INVITE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CSeq {
    pub seq: u32,
    pub method: Method,
}

impl CSeq {
    pub fn new(seq: u32, method: Method) -> Self {
        CSeq { seq, method }
    }

    /// The CSeq for the next request of the same dialog.
    pub fn next(&self, method: Method) -> Self {
        CSeq::new(self.seq.wrapping_add(1), method)
    }
}

impl fmt::Display for CSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.seq, self.method)
    }
}

impl FromStr for CSeq {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_cseq(s)
    }
}
