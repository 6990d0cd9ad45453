// Shared `key[=value]` splitting used by URI parameters, URI headers,
// TEL parameters and header parameters.

use crate::types::param::Params;

/// Describes one flavour of parameter list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairSyntax {
    /// Separator between pairs
    pub sep: u8,
    /// Byte that ends the list, if any
    pub stop: Option<u8>,
    /// Trim surrounding whitespace from keys and values
    pub trim: bool,
}

/// `;uri-parameters`, ended by `?`
pub(crate) const URI_PARAMS: PairSyntax = PairSyntax {
    sep: b';',
    stop: Some(b'?'),
    trim: false,
};

/// `?hname=hvalue&...`
pub(crate) const URI_HEADERS: PairSyntax = PairSyntax {
    sep: b'&',
    stop: None,
    trim: false,
};

/// `tel:number;par;...`
pub(crate) const TEL_PARAMS: PairSyntax = PairSyntax {
    sep: b';',
    stop: None,
    trim: false,
};

/// Header parameters after a name-addr or Via hop, where `; tag = x` is tolerated
pub(crate) const HEADER_PARAMS: PairSyntax = PairSyntax {
    sep: b';',
    stop: None,
    trim: true,
};

impl PairSyntax {
    /// Splits `input` into pairs and adds them to `params`.
    ///
    /// Each segment is split on its first `=`; a segment without `=` becomes a
    /// flag parameter and an empty segment is skipped. Returns the offset of the
    /// stop byte, or `input.len()` when the whole input was consumed.
    pub fn split_into(&self, input: &str, params: &mut Params) -> usize {
        let bytes = input.as_bytes();
        let mut start = 0;
        let mut equal: Option<usize> = None;

        for (i, &b) in bytes.iter().enumerate() {
            if Some(b) == self.stop {
                self.push(&input[start..i], equal.map(|e| e - start), params);
                return i;
            }
            if b == self.sep {
                self.push(&input[start..i], equal.map(|e| e - start), params);
                start = i + 1;
                equal = None;
            } else if b == b'=' && equal.is_none() {
                equal = Some(i);
            }
        }

        self.push(&input[start..], equal.map(|e| e - start), params);
        bytes.len()
    }

    fn push(&self, segment: &str, equal: Option<usize>, params: &mut Params) {
        let (key, value) = match equal {
            Some(pos) if pos > 0 => (&segment[..pos], &segment[pos + 1..]),
            _ => (segment, ""),
        };
        let (key, value) = if self.trim {
            (key.trim(), value.trim())
        } else {
            (key, value)
        };
        if key.is_empty() {
            return;
        }
        params.add(key, value);
    }
}
