//! Delimited-string encoding for persisted lists and sets.
//!
//! Every preference value is one string of tokens joined by [`SEPARATOR`].
//! Decoding never fails: empty and unparsable tokens are dropped.

use std::collections::BTreeSet;

/// Token separator inside a stored value.
pub const SEPARATOR: char = '|';

/// Normalise a user-supplied token so it survives a round trip.
///
/// Surrounding whitespace is trimmed and embedded separators become spaces.
/// An empty result means the token is blank and should be ignored.
#[must_use]
pub fn sanitize_token(raw: &str) -> String {
    raw.replace(SEPARATOR, " ").trim().to_string()
}

pub fn encode_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut encoded = String::new();
    for item in items {
        if !encoded.is_empty() {
            encoded.push(SEPARATOR);
        }
        encoded.push_str(item.as_ref());
    }
    encoded
}

#[must_use]
pub fn decode_list(raw: &str) -> Vec<String> {
    raw.split(SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

#[must_use]
pub fn encode_levels(levels: &BTreeSet<u8>) -> String {
    encode_list(levels.iter().map(ToString::to_string))
}

#[must_use]
pub fn decode_levels(raw: &str) -> BTreeSet<u8> {
    decode_list(raw)
        .iter()
        .filter_map(|token| token.parse().ok())
        .collect()
}
