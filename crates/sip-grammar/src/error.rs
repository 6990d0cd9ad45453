//! Error types for the SIP grammar engine.
//!
//! Every parser in this crate stops at the first grammar violation and returns
//! one of the variants below. None of them are fatal: they are the ordinary
//! outcome of parsing untrusted wire input, and the caller decides how the
//! enclosing message is disposed of.

use thiserror::Error;

/// Errors produced while parsing or manipulating SIP grammar elements.
///
/// Each variant carries the text that triggered it so the failure can be
/// logged without keeping the original buffer around.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Zero-length address or URI text where content is required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// URI scheme is not one of sip, sips or tel
    #[error("Unsupported URI scheme: {0}")]
    UnsupportedScheme(String),

    /// Scheme token does not match the parser it was handed to
    #[error("Invalid URI scheme: {0}")]
    InvalidScheme(String),

    /// No scheme separator could be found
    #[error("Missing URI scheme: {0}")]
    MissingScheme(String),

    /// Bracketed host without a usable closing bracket
    #[error("IPv6 reference has no closing bracket: {0}")]
    IPv6NoClosingBracket(String),

    /// Bracketed host content longer than any IPv6 text form
    #[error("IPv6 reference exceeds maximum length: {0}")]
    IPv6TooLong(String),

    /// Password present without a user part
    #[error("Invalid userinfo: {0}")]
    InvalidUserInfo(String),

    /// Empty host, or unexpected text following the host
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// Port text that is not a base-10 number in range
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    /// Disallowed character (or no digits) in a TEL number
    #[error("Invalid TEL number: {0}")]
    InvalidTelNumber(String),

    /// TEL to SIP conversion attempted without a phone-context parameter
    #[error("phone-context parameter is required for TEL to SIP conversion: {0}")]
    MissingPhoneContext(String),

    /// Angle brackets or address text present, but no URI inside
    #[error("No URI present: {0}")]
    NoUriPresent(String),

    /// Opening `<` without the matching `>`
    #[error("Invalid URI, missing end bracket: {0}")]
    InvalidUriMissingEndBracket(String),

    /// Quoted display name not followed by a URI
    #[error("No URI after display name: {0}")]
    NoUriAfterDisplayName(String),

    /// Quoted display name without its closing quote
    #[error("Unterminated quoted display name: {0}")]
    UnterminatedQuote(String),

    /// Backslash escape applied to CR or LF
    #[error("Invalid escape in quoted string: {0}")]
    InvalidEscape(String),

    /// Wildcard URI in a header other than Contact
    #[error("Wildcard URI not permitted in {0} header")]
    WildcardNotPermitted(String),

    /// Top-level comma found where a single address was expected
    #[error("Multiple addresses where one was expected: {0}")]
    MultipleAddressesUnexpected(String),

    /// Component setter that does not apply to this URI variant
    #[error("Operation not applicable: {0}")]
    NotApplicable(String),

    /// Malformed value for a non-address header
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, Error>;

impl<I: std::fmt::Debug> From<nom::Err<nom::error::Error<I>>> for Error {
    fn from(err: nom::Err<nom::error::Error<I>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::InvalidHeader("incomplete input".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                Error::InvalidHeader(format!("{:?} at {:?}", e.code, e.input))
            }
        }
    }
}
