//! # Address-Bearing Headers
//!
//! Typed forms of the headers whose values are name-addrs
//! ([RFC 3261 §20.10](https://datatracker.ietf.org/doc/html/rfc3261#section-20.10)):
//!
//! | Header | Type | Addresses | Wildcard |
//! |--------|------|-----------|----------|
//! | `From` / `f` | [`From`] | one | rejected |
//! | `To` / `t` | [`To`] | one | rejected |
//! | `Referred-By` / `b` | [`ReferredBy`] | one | rejected |
//! | `Refer-To` / `r` | [`ReferTo`] | one | allowed |
//! | `Contact` / `m` | [`Contact`] | one or more | allowed |
//! | `Route` | [`Route`] | one or more | allowed |
//! | `Record-Route` | [`RecordRoute`] | one or more | allowed |
//!
//! Single-address headers deref to [`NameAddress`]; list headers deref to
//! `Vec<NameAddress>`.
//!
//! ## Examples
//!
//! ```rust
//! use sip_grammar::types::addr_headers::{Contact, To};
//! use std::str::FromStr;
//!
//! let to = To::from_str("Bob <sip:bob@biloxi.com>;tag=a6c85cf").unwrap();
//! assert_eq!(to.display_name, "Bob");
//! assert_eq!(to.tag(), Some("a6c85cf"));
//!
//! let contact = Contact::from_str("<sip:a@10.0.0.1>;q=0.7, <sip:a@10.0.0.2>;q=0.1").unwrap();
//! assert_eq!(contact.len(), 2);
//! assert!(To::from_str("*").is_err());
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::headers::address::{
    parse_contact, parse_from, parse_record_route, parse_refer_to, parse_referred_by,
    parse_route, parse_to,
};
use crate::types::address::NameAddress;

macro_rules! single_address_header {
    ($(#[$meta:meta])* $name:ident, $parser:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(pub NameAddress);

        impl $name {
            pub fn new(address: NameAddress) -> Self {
                $name(address)
            }

            pub fn address(&self) -> &NameAddress {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = NameAddress;

            fn deref(&self) -> &NameAddress {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut NameAddress {
                &mut self.0
            }
        }

        impl ::std::convert::From<NameAddress> for $name {
            fn from(address: NameAddress) -> Self {
                $name(address)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                $parser(s)
            }
        }
    };
}

macro_rules! address_list_header {
    ($(#[$meta:meta])* $name:ident, $parser:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name(pub Vec<NameAddress>);

        impl $name {
            pub fn new(addresses: Vec<NameAddress>) -> Self {
                $name(addresses)
            }

            pub fn single(address: NameAddress) -> Self {
                $name(vec![address])
            }

            /// The first address in the list.
            pub fn first_address(&self) -> Option<&NameAddress> {
                self.0.first()
            }
        }

        impl Deref for $name {
            type Target = Vec<NameAddress>;

            fn deref(&self) -> &Vec<NameAddress> {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Vec<NameAddress> {
                &mut self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for (i, address) in self.0.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", address)?;
                }
                Ok(())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                $parser(s)
            }
        }
    };
}

single_address_header!(
    /// Logical initiator of the request.
    From,
    parse_from
);

single_address_header!(
    /// Logical recipient of the request.
    To,
    parse_to
);

single_address_header!(
    /// Target of a REFER ([RFC 3515](https://datatracker.ietf.org/doc/html/rfc3515)).
    ReferTo,
    parse_refer_to
);

single_address_header!(
    /// Referrer identity ([RFC 3892](https://datatracker.ietf.org/doc/html/rfc3892)).
    ReferredBy,
    parse_referred_by
);

address_list_header!(
    /// Where subsequent requests should be sent; `*` in REGISTER removes all
    /// bindings.
    Contact,
    parse_contact
);

address_list_header!(
    /// Proxies to visit, in order.
    Route,
    parse_route
);

address_list_header!(
    /// Proxies that want to stay on the dialog path.
    RecordRoute,
    parse_record_route
);

impl Contact {
    /// The `*` contact.
    pub fn wildcard() -> Self {
        Contact::single(NameAddress::wildcard())
    }

    /// `true` when the header is the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.0.iter().any(NameAddress::is_wildcard)
    }
}

impl Route {
    /// Builds the dialog route set from Record-Route values, reversing the
    /// order as a UAC does.
    pub fn from_record_route(record_route: &RecordRoute) -> Self {
        Route(record_route.iter().rev().cloned().collect())
    }
}
