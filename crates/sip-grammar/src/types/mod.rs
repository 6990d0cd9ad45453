//! SIP grammar values.
//!
//! Everything here is a plain value: cloneable, comparable, serializable
//! with serde, and rendered back to wire text through `Display`.

pub mod addr_headers;
pub mod address;
pub mod call_id;
pub mod cseq;
pub mod headers;
pub mod max_forwards;
pub mod method;
pub mod param;
pub mod uri;
pub mod via;
